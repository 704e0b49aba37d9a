pub mod bracket_mapper;
pub mod fixation_mapper;
pub mod reference_subsidy_mapper;
