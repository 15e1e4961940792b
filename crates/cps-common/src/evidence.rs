//! Binary evidence observations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a finding: present (+1) or absent (-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "i8", into = "i8")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn is_positive(&self) -> bool {
        matches!(self, Sign::Positive)
    }
}

impl TryFrom<i8> for Sign {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sign::Positive),
            -1 => Ok(Sign::Negative),
            other => Err(format!("evidence sign must be +1 or -1, got {}", other)),
        }
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Positive => write!(f, "+"),
            Sign::Negative => write!(f, "-"),
        }
    }
}

/// A single logged finding, keyed into the likelihood-ratio table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Observation {
    pub key: String,
    pub sign: Sign,
}

impl Observation {
    pub fn new(key: impl Into<String>, sign: Sign) -> Self {
        Self {
            key: key.into(),
            sign,
        }
    }

    pub fn positive(key: impl Into<String>) -> Self {
        Self::new(key, Sign::Positive)
    }

    pub fn negative(key: impl Into<String>) -> Self {
        Self::new(key, Sign::Negative)
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.key, self.sign)
    }
}
