//! Job, Step and Environment data assets.

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{AssetKind, EnvironmentVariables, JobParameters, StepParameters};

/// A job description: template-backed job parameters plus references to the
/// steps and environments it runs with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct JobAsset {
    pub name: String,

    /// Template that defines the expected parameter set
    pub template_path: PathBuf,

    #[serde(default)]
    pub parameters: JobParameters,

    /// Names of referenced step assets, in submission order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,

    /// Names of referenced environment assets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,
}

impl JobAsset {
    pub fn new(name: impl Into<String>, template_path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            template_path: template_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }
}

/// A step description with per-task parameter ranges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StepAsset {
    pub name: String,

    pub template_path: PathBuf,

    #[serde(default)]
    pub parameters: StepParameters,

    /// Names of steps that must run before this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,
}

impl StepAsset {
    pub fn new(name: impl Into<String>, template_path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            template_path: template_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }
}

/// An environment description holding variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EnvironmentAsset {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub template_path: PathBuf,

    #[serde(default)]
    pub variables: EnvironmentVariables,
}

impl EnvironmentAsset {
    pub fn new(name: impl Into<String>, template_path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            template_path: template_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }
}

/// Any stored data asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Asset {
    Job(JobAsset),
    Step(StepAsset),
    Environment(EnvironmentAsset),
}

impl Asset {
    pub fn kind(&self) -> AssetKind {
        match self {
            Asset::Job(_) => AssetKind::Job,
            Asset::Step(_) => AssetKind::Step,
            Asset::Environment(_) => AssetKind::Environment,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Asset::Job(job) => &job.name,
            Asset::Step(step) => &step.name,
            Asset::Environment(env) => &env.name,
        }
    }

    pub fn template_path(&self) -> &Path {
        match self {
            Asset::Job(job) => &job.template_path,
            Asset::Step(step) => &step.template_path,
            Asset::Environment(env) => &env.template_path,
        }
    }
}

impl From<JobAsset> for Asset {
    fn from(job: JobAsset) -> Self {
        Asset::Job(job)
    }
}

impl From<StepAsset> for Asset {
    fn from(step: StepAsset) -> Self {
        Asset::Step(step)
    }
}

impl From<EnvironmentAsset> for Asset {
    fn from(env: EnvironmentAsset) -> Self {
        Asset::Environment(env)
    }
}

/// Library listing entry for a stored asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetSummary {
    pub id: u64,
    pub kind: AssetKind,
    pub name: String,
    pub template_path: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
