//! Row types and tags for the procedure catalog

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

/// Claim scenario a provider checklist belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    Accidents,
    Damages,
    Theft,
    Exclusions,
}

impl ClaimType {
    /// All claim types in display order
    pub const ALL: [ClaimType; 4] = [
        ClaimType::Accidents,
        ClaimType::Damages,
        ClaimType::Theft,
        ClaimType::Exclusions,
    ];

    /// Value stored in the `sinistro_type` column
    pub fn tag(self) -> &'static str {
        match self {
            ClaimType::Accidents => "acidentes",
            ClaimType::Damages => "avarias",
            ClaimType::Theft => "roubo",
            ClaimType::Exclusions => "exclusoes",
        }
    }

    /// English name
    pub fn name(self) -> &'static str {
        match self {
            ClaimType::Accidents => "accidents",
            ClaimType::Damages => "damages",
            ClaimType::Theft => "theft",
            ClaimType::Exclusions => "exclusions",
        }
    }
}

impl std::fmt::Display for ClaimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for ClaimType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "acidentes" | "accidents" => Ok(ClaimType::Accidents),
            "avarias" | "damages" => Ok(ClaimType::Damages),
            "roubo" | "theft" => Ok(ClaimType::Theft),
            "exclusoes" | "exclusions" => Ok(ClaimType::Exclusions),
            _ => Err(Error::Validation(format!("Unknown claim type: {}", s))),
        }
    }
}

/// Which of the two per-provider lists a procedure lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checklist {
    Primary,
    Additional,
}

impl Checklist {
    pub const ALL: [Checklist; 2] = [Checklist::Primary, Checklist::Additional];

    pub(crate) fn table(self) -> &'static str {
        match self {
            Checklist::Primary => "provider_procedures",
            Checklist::Additional => "additional_provider_procedures",
        }
    }
}

impl std::fmt::Display for Checklist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Checklist::Primary => write!(f, "primary"),
            Checklist::Additional => write!(f, "additional"),
        }
    }
}

/// A client
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
}

/// One step of a client's checklist
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ClientProcedure {
    pub id: i64,
    pub client_id: i64,
    pub procedure_text: String,
}

/// A service provider
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    pub image: String,
}

/// One step of a provider checklist (primary or additional)
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ProviderProcedure {
    pub id: i64,
    pub provider_id: i64,
    pub sinistro_type: String,
    pub procedure_text: String,
}

impl ProviderProcedure {
    pub fn claim_type(&self) -> Result<ClaimType> {
        self.sinistro_type.parse()
    }
}

/// Claim-type level catalog entry, not tied to any client or provider
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ReferenceProcedure {
    pub id: i64,
    pub sinistro_type: String,
    pub procedure_text: String,
}

/// Row counts per table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub clients: u64,
    pub client_procedures: u64,
    pub providers: u64,
    pub provider_procedures: u64,
    pub additional_provider_procedures: u64,
    pub sinistro_procedures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_type_accepts_tag_and_english_name() {
        for claim in ClaimType::ALL {
            assert_eq!(claim.tag().parse::<ClaimType>().unwrap(), claim);
            assert_eq!(claim.name().parse::<ClaimType>().unwrap(), claim);
        }
        assert_eq!("THEFT".parse::<ClaimType>().unwrap(), ClaimType::Theft);
    }

    #[test]
    fn test_claim_type_rejects_free_text() {
        let err = "fire".parse::<ClaimType>().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!("".parse::<ClaimType>().is_err());
    }

    #[test]
    fn test_checklists_use_distinct_tables() {
        assert_ne!(Checklist::Primary.table(), Checklist::Additional.table());
    }
}
