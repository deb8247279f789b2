//! Kind enumerations for parameters and assets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declared type of a job or task parameter.
///
/// Serialized with the OpenJD type tokens (`INT`, `FLOAT`, `STRING`, `PATH`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterKind {
    Int,
    Float,
    #[default]
    String,
    Path,
}

impl FromStr for ParameterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INT" => Ok(ParameterKind::Int),
            "FLOAT" => Ok(ParameterKind::Float),
            "STRING" => Ok(ParameterKind::String),
            "PATH" => Ok(ParameterKind::Path),
            _ => Err(format!("Invalid parameter type: {s}")),
        }
    }
}

impl ParameterKind {
    /// OpenJD token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Int => "INT",
            ParameterKind::Float => "FLOAT",
            ParameterKind::String => "STRING",
            ParameterKind::Path => "PATH",
        }
    }
}

/// The three kinds of template-backed data asset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Job,
    Step,
    Environment,
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "job" => Ok(AssetKind::Job),
            "step" => Ok(AssetKind::Step),
            "environment" | "env" => Ok(AssetKind::Environment),
            _ => Err(format!("Invalid asset kind: {s}")),
        }
    }
}

impl AssetKind {
    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Job => "job",
            AssetKind::Step => "step",
            AssetKind::Environment => "environment",
        }
    }
}
