//! Cross-screen fields of a fixation case.
use super::legislature::Legislature;

/// Municipality data shared by the fixation screens of one case
#[derive(Debug, Clone, PartialEq)]
pub struct FixationContext {
    pub legislature: Legislature,
    pub inhabitants: u64,
    pub municipality: Option<String>,
    /// Court process number of the case
    pub process_number: Option<String>,
}

impl FixationContext {
    pub fn new(legislature: Legislature, inhabitants: u64) -> Self {
        Self {
            legislature,
            inhabitants,
            municipality: None,
            process_number: None,
        }
    }

    pub fn with_municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = Some(municipality.into());
        self
    }

    pub fn with_process_number(mut self, process_number: impl Into<String>) -> Self {
        self.process_number = Some(process_number.into());
        self
    }
}
