pub mod connection;
pub mod percentage_bracket_repository;
pub mod reference_subsidy_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use percentage_bracket_repository::PercentageBracketRepository;
pub use reference_subsidy_repository::ReferenceSubsidyRepository;
