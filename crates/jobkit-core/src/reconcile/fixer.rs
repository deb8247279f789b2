//! Repairing a parameter set so it matches its template again.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParameterShape;

/// How [`fix`] treats values the user already set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FixStrategy {
    /// Discard the current set and take the template's set as is.
    #[default]
    Reset,
    /// Keep the current value of entries whose name and kind both match the
    /// template; everything else comes from the template.
    PreserveOverrides,
}

impl FromStr for FixStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reset" => Ok(FixStrategy::Reset),
            "preserve-overrides" | "preserve" => Ok(FixStrategy::PreserveOverrides),
            _ => Err(format!("Invalid fix strategy: {s}")),
        }
    }
}

/// Produces the repaired set for `current`.
///
/// Either strategy yields a set with exactly the template's names, in the
/// template's order, so a check right after passes and fixing again changes
/// nothing.
pub fn fix<S: ParameterShape>(current: &S, expected: S, strategy: FixStrategy) -> S {
    match strategy {
        FixStrategy::Reset => expected,
        FixStrategy::PreserveOverrides => current.preserve_overrides(expected),
    }
}
