//! Template loading.
//!
//! A template is an on-disk OpenJD document that declares the expected
//! parameters of a job, step or environment. The reconciliation core only
//! depends on the [`TemplateLoader`] trait; [`YamlTemplateLoader`] is the
//! file-backed implementation and [`CachedTemplateLoader`] adds a path and
//! modification-time cache in front of any loader.
//!
//! Loaders are pure functions of file contents. Failures are reported as
//! [`TemplateError`]; deciding how to degrade is left to the caller.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{EnvironmentVariables, JobParameters, StepParameters};

pub mod cache;
pub mod range;
pub mod yaml;

pub use cache::CachedTemplateLoader;
pub use range::expand_int_range;
pub use yaml::YamlTemplateLoader;

/// Errors raised while reading or interpreting a template file.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template path is empty")]
    EmptyPath,
    #[error("Failed to read template '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse template '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid type '{value}' for parameter '{name}'")]
    InvalidKind { name: String, value: String },
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
    #[error("Invalid range expression '{expression}': {reason}")]
    InvalidRange { expression: String, reason: String },
}

/// Parameters declared by a job template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobTemplate {
    pub name: Option<String>,
    pub parameters: JobParameters,
}

/// Task parameters declared by a step template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepTemplate {
    pub name: Option<String>,
    pub parameters: StepParameters,
}

/// Variables declared by an environment template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvironmentTemplate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub variables: EnvironmentVariables,
}

/// Source of expected parameter sets.
pub trait TemplateLoader {
    fn load_job(&self, path: &Path) -> Result<JobTemplate, TemplateError>;

    fn load_step(&self, path: &Path) -> Result<StepTemplate, TemplateError>;

    fn load_environment(&self, path: &Path) -> Result<EnvironmentTemplate, TemplateError>;

    /// Path that will actually be read for `path`.
    fn resolve(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}
