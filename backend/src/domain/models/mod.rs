pub mod fixation_context;
pub mod legislature;
pub mod percentage_bracket;
pub mod reference_subsidy;
