//! Domain model for a legislative term key.
use std::fmt;
use std::str::FromStr;

/// A legislative term such as "2021-2025", used to scope reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Legislature {
    start_year: u16,
    end_year: u16,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LegislatureError {
    #[error("Legislature cannot be empty")]
    Empty,
    #[error("Invalid legislature '{0}': expected YYYY-YYYY")]
    InvalidFormat(String),
    #[error("Invalid legislature '{0}': end year must be after start year")]
    InvalidRange(String),
}

impl Legislature {
    pub fn new(start_year: u16, end_year: u16) -> Result<Self, LegislatureError> {
        if end_year <= start_year {
            return Err(LegislatureError::InvalidRange(format!(
                "{}-{}",
                start_year, end_year
            )));
        }
        Ok(Self {
            start_year,
            end_year,
        })
    }

    pub fn start_year(&self) -> u16 {
        self.start_year
    }

    pub fn end_year(&self) -> u16 {
        self.end_year
    }

    /// Storage key, e.g. "2021-2025"
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Legislature {
    type Err = LegislatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LegislatureError::Empty);
        }

        let parse_year = |part: &str| -> Option<u16> {
            if part.len() == 4 && part.chars().all(|c| c.is_ascii_digit()) {
                part.parse().ok()
            } else {
                None
            }
        };

        let (start, end) = trimmed
            .split_once('-')
            .and_then(|(start, end)| Some((parse_year(start)?, parse_year(end)?)))
            .ok_or_else(|| LegislatureError::InvalidFormat(trimmed.to_string()))?;

        Legislature::new(start, end).map_err(|_| LegislatureError::InvalidRange(trimmed.to_string()))
    }
}

impl fmt::Display for Legislature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:04}", self.start_year, self.end_year)
    }
}
