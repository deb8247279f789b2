//! Parameter structures for workbench operations.
//!
//! These structures carry the inputs of [`Workbench`](crate::Workbench)
//! operations without any interface-specific derives. Interface layers define
//! their own argument types (clap derives in the CLI) and convert into these
//! with `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   Workbench     │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::AssetKind;

/// Identifies one stored asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub kind: AssetKind,
    pub name: String,
}

impl AssetRef {
    pub fn new(kind: AssetKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Parameters for creating an asset from a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAsset {
    pub kind: AssetKind,
    pub name: String,
    /// Template to load the initial parameters from
    pub template_path: PathBuf,
}

/// Parameters for listing stored assets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAssets {
    /// Restrict the listing to one kind
    pub kind: Option<AssetKind>,
}

/// Parameters for pointing an asset at a different template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetargetAsset {
    pub asset: AssetRef,
    pub template_path: PathBuf,
}

/// Parameters for editing one parameter value.
///
/// For step task parameters `value` is the comma separated range, one entry
/// per task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetParameter {
    pub asset: AssetRef,
    pub parameter: String,
    pub value: String,
}

/// Parameters for addressing one parameter of an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterRef {
    pub asset: AssetRef,
    pub parameter: String,
}

/// Parameters for adding or removing step and environment references.
///
/// Jobs reference steps and environments; steps reference environments only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkAssets {
    pub target: AssetRef,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub environments: Vec<String>,
    /// Remove the references instead of adding them
    #[serde(default)]
    pub unlink: bool,
}

/// Parameters for replacing the dependencies of a step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDependencies {
    pub step: String,
    pub depends_on: Vec<String>,
}
