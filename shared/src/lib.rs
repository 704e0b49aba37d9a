use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five subsidy roles fixed for a legislative term.
///
/// Serialized with the keys used by the fixation screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubsidyRole {
    #[serde(rename = "prefeito")]
    Mayor,
    #[serde(rename = "vicePrefeito")]
    ViceMayor,
    #[serde(rename = "secretarios")]
    Secretaries,
    #[serde(rename = "vereadores")]
    Councilors,
    #[serde(rename = "presidenteCamara")]
    CouncilPresident,
}

impl SubsidyRole {
    pub const ALL: [SubsidyRole; 5] = [
        SubsidyRole::Mayor,
        SubsidyRole::ViceMayor,
        SubsidyRole::Secretaries,
        SubsidyRole::Councilors,
        SubsidyRole::CouncilPresident,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SubsidyRole::Mayor => "Mayor",
            SubsidyRole::ViceMayor => "Vice-Mayor",
            SubsidyRole::Secretaries => "Secretaries",
            SubsidyRole::Councilors => "Councilors",
            SubsidyRole::CouncilPresident => "Council President",
        }
    }
}

impl fmt::Display for SubsidyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Candidate subsidy values as typed into the fixation form.
///
/// `None` and `Some("")` both mean the field was left empty, which is
/// different from an explicit `"0"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubsidyProposal {
    #[serde(rename = "prefeito", default)]
    pub mayor: Option<String>,
    #[serde(rename = "vicePrefeito", default)]
    pub vice_mayor: Option<String>,
    #[serde(rename = "secretarios", default)]
    pub secretaries: Option<String>,
    #[serde(rename = "vereadores", default)]
    pub councilors: Option<String>,
    #[serde(rename = "presidenteCamara", default)]
    pub council_president: Option<String>,
}

impl SubsidyProposal {
    /// Raw text of the field for a role
    pub fn field(&self, role: SubsidyRole) -> Option<&str> {
        let value = match role {
            SubsidyRole::Mayor => &self.mayor,
            SubsidyRole::ViceMayor => &self.vice_mayor,
            SubsidyRole::Secretaries => &self.secretaries,
            SubsidyRole::Councilors => &self.councilors,
            SubsidyRole::CouncilPresident => &self.council_president,
        };
        value.as_deref()
    }

    /// Whether the field for a role holds any text (an explicit zero counts)
    pub fn is_present(&self, role: SubsidyRole) -> bool {
        self.field(role).map(|v| !v.is_empty()).unwrap_or(false)
    }

    pub fn set(&mut self, role: SubsidyRole, value: impl Into<String>) {
        let value = Some(value.into());
        match role {
            SubsidyRole::Mayor => self.mayor = value,
            SubsidyRole::ViceMayor => self.vice_mayor = value,
            SubsidyRole::Secretaries => self.secretaries = value,
            SubsidyRole::Councilors => self.councilors = value,
            SubsidyRole::CouncilPresident => self.council_president = value,
        }
    }
}

/// Verdict for a single subsidy row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Validation results for all five roles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixationValidation {
    #[serde(rename = "prefeito")]
    pub mayor: ValidationResult,
    #[serde(rename = "vicePrefeito")]
    pub vice_mayor: ValidationResult,
    #[serde(rename = "secretarios")]
    pub secretaries: ValidationResult,
    #[serde(rename = "vereadores")]
    pub councilors: ValidationResult,
    #[serde(rename = "presidenteCamara")]
    pub council_president: ValidationResult,
}

impl FixationValidation {
    pub fn get(&self, role: SubsidyRole) -> &ValidationResult {
        match role {
            SubsidyRole::Mayor => &self.mayor,
            SubsidyRole::ViceMayor => &self.vice_mayor,
            SubsidyRole::Secretaries => &self.secretaries,
            SubsidyRole::Councilors => &self.councilors,
            SubsidyRole::CouncilPresident => &self.council_president,
        }
    }

    pub fn get_mut(&mut self, role: SubsidyRole) -> &mut ValidationResult {
        match role {
            SubsidyRole::Mayor => &mut self.mayor,
            SubsidyRole::ViceMayor => &mut self.vice_mayor,
            SubsidyRole::Secretaries => &mut self.secretaries,
            SubsidyRole::Councilors => &mut self.councilors,
            SubsidyRole::CouncilPresident => &mut self.council_president,
        }
    }

    pub fn all_valid(&self) -> bool {
        SubsidyRole::ALL.iter().all(|role| self.get(*role).is_valid)
    }
}

/// Which reference subsidy a record holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceSubsidyKind {
    /// Subsídio de Deputado Estadual
    #[serde(rename = "state-deputy")]
    StateDeputy,
    /// Subsídio de Ministro do STF
    #[serde(rename = "stf-minister")]
    StfMinister,
}

impl ReferenceSubsidyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceSubsidyKind::StateDeputy => "state-deputy",
            ReferenceSubsidyKind::StfMinister => "stf-minister",
        }
    }
}

impl fmt::Display for ReferenceSubsidyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReferenceSubsidyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "state-deputy" => Ok(ReferenceSubsidyKind::StateDeputy),
            "stf-minister" => Ok(ReferenceSubsidyKind::StfMinister),
            other => Err(format!(
                "Unknown reference subsidy kind '{}'. Expected state-deputy or stf-minister",
                other
            )),
        }
    }
}

/// Reference subsidy for a legislative term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSubsidy {
    /// Term key, e.g. "2021-2025"
    pub legislature: String,
    pub kind: ReferenceSubsidyKind,
    pub amount: f64,
    /// Law that fixed the amount
    pub law: String,
    /// Date the law took effect
    pub effective_date: NaiveDate,
}

/// Population bracket as stored; bounds may come in either order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageBracket {
    pub minimum: u64,
    /// `None` or 0 means no upper bound
    pub maximum: Option<u64>,
    pub percentage: f64,
}

/// Two brackets whose ranges intersect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketOverlap {
    pub first: PercentageBracket,
    pub second: PercentageBracket,
}

/// Ceiling applied to councilors and the council president
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilCeiling {
    pub bracket: PercentageBracket,
    pub percentage: f64,
    pub ceiling: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateFixationRequest {
    pub legislature: String,
    pub inhabitants: u64,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub process_number: Option<String>,
    #[serde(default)]
    pub proposal: SubsidyProposal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateFixationResponse {
    pub legislature: String,
    pub inhabitants: u64,
    pub municipality: Option<String>,
    pub process_number: Option<String>,
    pub results: FixationValidation,
    pub ceiling: Option<CouncilCeiling>,
    pub all_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatCurrencyRequest {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatCurrencyResponse {
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseCurrencyRequest {
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseCurrencyResponse {
    pub amount: f64,
    /// Amount rendered as "R$ 1.234,56"
    pub display: String,
}

/// Body for registering a reference subsidy for a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreReferenceSubsidyRequest {
    pub amount: f64,
    pub law: String,
    pub effective_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacePercentageBracketsRequest {
    pub brackets: Vec<PercentageBracket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageBracketsResponse {
    pub legislature: String,
    /// Sorted by normalized lower bound
    pub brackets: Vec<PercentageBracket>,
    pub overlaps: Vec<BracketOverlap>,
}
