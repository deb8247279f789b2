//! OpenJD YAML template loader.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::debug;
use serde::Deserialize;
use serde_yaml::Value;

use super::{
    range::expand_int_range, EnvironmentTemplate, JobTemplate, StepTemplate, TemplateError,
    TemplateLoader,
};
use crate::models::{
    EnvironmentVariables, JobParameters, ParameterDefinition, ParameterKind, StepParameters,
    StepTaskParameterDefinition,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobDocument {
    name: Option<String>,
    #[serde(default)]
    parameter_definitions: Vec<ParameterDocument>,
}

#[derive(Debug, Deserialize)]
struct ParameterDocument {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    default: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepDocument {
    name: Option<String>,
    parameter_space: Option<ParameterSpaceDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParameterSpaceDocument {
    #[serde(default)]
    task_parameter_definitions: Vec<TaskParameterDocument>,
}

#[derive(Debug, Deserialize)]
struct TaskParameterDocument {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    range: Option<Value>,
}

/// Accepts both a bare environment and the `environment:` wrapper used by
/// OpenJD environment templates.
#[derive(Debug, Deserialize)]
struct EnvironmentDocument {
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    variables: Option<serde_yaml::Mapping>,
    environment: Option<Box<EnvironmentDocument>>,
}

/// Loads templates from YAML files on disk.
///
/// Relative paths are resolved against the templates directory when one is
/// configured.
#[derive(Debug, Clone, Default)]
pub struct YamlTemplateLoader {
    templates_dir: Option<PathBuf>,
}

impl YamlTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory relative template paths are resolved against.
    pub fn with_templates_dir<P: AsRef<Path>>(mut self, dir: Option<P>) -> Self {
        self.templates_dir = dir.map(|d| d.as_ref().to_path_buf());
        self
    }

    fn read_document<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T, TemplateError> {
        if path.as_os_str().is_empty() {
            return Err(TemplateError::EmptyPath);
        }
        let resolved = self.resolve(path);
        debug!("Reading template {}", resolved.display());

        let contents = fs::read_to_string(&resolved).map_err(|source| TemplateError::Io {
            path: resolved.clone(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| TemplateError::Parse {
            path: resolved,
            source,
        })
    }
}

impl TemplateLoader for YamlTemplateLoader {
    fn load_job(&self, path: &Path) -> Result<JobTemplate, TemplateError> {
        let document: JobDocument = self.read_document(path)?;

        let parameters = document
            .parameter_definitions
            .into_iter()
            .map(|p| {
                let kind = parse_kind(&p.name, &p.kind)?;
                let value = match p.default.as_ref() {
                    Some(value) => encode_scalar(&p.name, value)?,
                    None => String::new(),
                };
                Ok(ParameterDefinition::new(p.name, kind, value))
            })
            .collect::<Result<Vec<_>, TemplateError>>()?;

        Ok(JobTemplate {
            name: document.name,
            parameters: JobParameters(parameters),
        })
    }

    fn load_step(&self, path: &Path) -> Result<StepTemplate, TemplateError> {
        let document: StepDocument = self.read_document(path)?;

        let parameters = document
            .parameter_space
            .map(|space| space.task_parameter_definitions)
            .unwrap_or_default()
            .into_iter()
            .map(|p| {
                let kind = parse_kind(&p.name, &p.kind)?;
                let range = match p.range.as_ref() {
                    Some(range) => encode_range(&p.name, kind, range)?,
                    None => Vec::new(),
                };
                Ok(StepTaskParameterDefinition {
                    name: p.name,
                    kind,
                    range,
                })
            })
            .collect::<Result<Vec<_>, TemplateError>>()?;

        Ok(StepTemplate {
            name: document.name,
            parameters: StepParameters(parameters),
        })
    }

    fn load_environment(&self, path: &Path) -> Result<EnvironmentTemplate, TemplateError> {
        let mut document: EnvironmentDocument = self.read_document(path)?;
        if let Some(inner) = document.environment.take() {
            document = *inner;
        }

        let mut variables = EnvironmentVariables::default();
        for (key, value) in document.variables.unwrap_or_default() {
            let name = match &key {
                Value::String(name) => name.clone(),
                other => encode_scalar("variables", other)?,
            };
            let value = encode_scalar(&name, &value)?;
            variables.insert(name, value);
        }

        Ok(EnvironmentTemplate {
            name: document.name,
            description: document.description,
            variables,
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.templates_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn parse_kind(name: &str, raw: &str) -> Result<ParameterKind, TemplateError> {
    ParameterKind::from_str(raw).map_err(|_| TemplateError::InvalidKind {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// Encodes a YAML scalar the way it is stored on parameters.
fn encode_scalar(name: &str, value: &Value) -> Result<String, TemplateError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Tagged(tagged) => encode_scalar(name, &tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => Err(TemplateError::InvalidValue {
            name: name.to_string(),
            reason: "expected a scalar".to_string(),
        }),
    }
}

fn encode_range(
    name: &str,
    kind: ParameterKind,
    range: &Value,
) -> Result<Vec<String>, TemplateError> {
    match range {
        Value::Sequence(items) => items.iter().map(|item| encode_scalar(name, item)).collect(),
        Value::String(expression) if kind == ParameterKind::Int => expand_int_range(expression),
        Value::Null => Ok(Vec::new()),
        scalar => Ok(vec![encode_scalar(name, scalar)?]),
    }
}
