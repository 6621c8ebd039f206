//! Property dispute categories for Bangalore cases.
//!
//! The category is chosen by the person filing the case and only steers the
//! prompt context and report labels. It carries no other state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of property dispute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeCategory {
    Inheritance,
    Boundary,
    Mutation,
    Tax,
    BbmpBda,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dispute category: {0:?}")]
pub struct UnknownCategory(pub String);

impl DisputeCategory {
    pub const ALL: [DisputeCategory; 6] = [
        Self::Inheritance,
        Self::Boundary,
        Self::Mutation,
        Self::Tax,
        Self::BbmpBda,
        Self::Other,
    ];

    /// Wire value, as sent to the model and stored with the case.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inheritance => "inheritance",
            Self::Boundary => "boundary",
            Self::Mutation => "mutation",
            Self::Tax => "tax",
            Self::BbmpBda => "bbmp_bda",
            Self::Other => "other",
        }
    }

    /// Parse a category, mapping anything unrecognised to [`Other`](Self::Other).
    pub fn from_str_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Other)
    }

    /// One-sentence context injected into the analysis prompt.
    pub fn context(&self) -> &'static str {
        match self {
            Self::Inheritance => {
                "Focus on succession and partition of family property under the Hindu Succession Act, \
                 1956 (as amended in 2005), the Indian Succession Act, 1925 and Karnataka partition practice, \
                 including coparcenary rights of daughters and the effect of wills and family settlements."
            }
            Self::Boundary => {
                "Focus on boundary and encroachment questions resolved through survey sketches, \
                 the Karnataka Land Revenue Act, 1964 survey provisions, RTC/Pahani entries and \
                 suits for declaration, injunction and possession."
            }
            Self::Mutation => {
                "Focus on mutation of revenue records and title defects: khata transfer, \
                 RTC/Pahani mutation under the Karnataka Land Revenue Act, 1964, and the \
                 evidentiary limits of mutation entries as proof of title."
            }
            Self::Tax => {
                "Focus on property tax assessment and arrears under the BBMP Act, 2020 and its \
                 self-assessment scheme, including penalties, khata linkage and appeal remedies."
            }
            Self::BbmpBda => {
                "Focus on disputes with civic and development authorities: BBMP khata and building \
                 plan sanctions, BDA allotments and acquisitions under the Bangalore Development \
                 Authority Act, 1976, demolition notices and regularisation schemes."
            }
            Self::Other => {
                "Treat this as a general Karnataka property matter and identify the most relevant \
                 statutes, such as the Transfer of Property Act, 1882, the Registration Act, 1908 \
                 and the Specific Relief Act, 1963."
            }
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inheritance => "Inheritance & Partition",
            Self::Boundary => "Boundary Disputes",
            Self::Mutation => "Mutation & Title Issues",
            Self::Tax => "Property Tax Issues",
            Self::BbmpBda => "BBMP/BDA Issues",
            Self::Other => "Other Property Issues",
        }
    }
}

impl fmt::Display for DisputeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisputeCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
