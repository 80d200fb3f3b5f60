use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Status of an assigned service. The wire spelling of `ExpSoon` is `Exp_soon`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[default]
    Active,
    #[serde(rename = "Exp_soon")]
    ExpSoon,
    Expired,
}

impl ServiceStatus {
    pub const ALL: [ServiceStatus; 3] = [Self::Active, Self::ExpSoon, Self::Expired];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpSoon => "Exp_soon",
            Self::Expired => "Expired",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ModelError::Validation(format!("unknown status '{s}'")))
    }
}
