//! Consistency check results and diagnostics.

use serde::{Deserialize, Serialize};

use super::{AssetKind, ParameterKind};

/// Outcome of comparing an asset's parameters against its template.
///
/// Produced fresh by every check; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ConsistencyCheckResult {
    pub passed: bool,

    /// First diagnostic encountered; empty when passed
    pub reason: String,
}

impl ConsistencyCheckResult {
    pub fn passed() -> Self {
        Self {
            passed: true,
            reason: String::new(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: reason.into(),
        }
    }
}

/// Identity of one entry of a parameter set, as used for diffing.
///
/// Environment variables carry no kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ShapeKey {
    pub name: String,
    pub kind: Option<ParameterKind>,
}

impl ShapeKey {
    pub fn new(name: impl Into<String>, kind: Option<ParameterKind>) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Symmetric difference between an asset's parameters and its template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ShapeDiff {
    /// Declared by the template but absent from the asset
    pub missing_in_asset: Vec<ShapeKey>,

    /// Present on the asset but no longer declared by the template
    pub missing_in_template: Vec<ShapeKey>,

    /// Present on both sides under the same name with a different kind
    pub kind_changed: Vec<String>,
}

impl ShapeDiff {
    pub fn is_empty(&self) -> bool {
        self.missing_in_asset.is_empty()
            && self.missing_in_template.is_empty()
            && self.kind_changed.is_empty()
    }
}

/// Check result for a stored asset together with its diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsistencyReport {
    pub kind: AssetKind,
    pub name: String,
    pub result: ConsistencyCheckResult,
    pub diff: ShapeDiff,

    /// Parameters whose value or range differs from the template default
    pub non_default: Vec<String>,
}

/// Result of fixing a stored asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixReport {
    /// Divergence that the fix repaired
    pub repaired: ShapeDiff,

    /// Check performed right after the fix
    pub after: ConsistencyReport,
}

/// Result of validating a job before submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobValidation {
    pub job: String,

    /// Step names ordered so that every dependency precedes its dependants
    pub execution_order: Vec<String>,

    /// Environment names referenced by the job or any of its steps
    pub environments: Vec<String>,
}
