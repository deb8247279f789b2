//! Parameter definitions and the three parameter set shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ParameterKind;
use crate::error::{JobkitError, Result};

/// Typed view of an encoded parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Int(i64),
    Float(f64),
    String(String),
    Path(String),
}

impl ParameterValue {
    /// Decodes `raw` as a value of `kind`. The empty string means unset and
    /// decodes to `None`.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::InvalidInput` naming `field` when `raw` does not
    /// parse as `kind`.
    pub fn decode(field: &str, kind: ParameterKind, raw: &str) -> Result<Option<Self>> {
        if raw.is_empty() {
            return Ok(None);
        }
        let invalid =
            || JobkitError::invalid_input(field, format!("'{raw}' is not a valid {kind} value"));
        let value = match kind {
            ParameterKind::Int => raw.trim().parse().map(Self::Int).map_err(|_| invalid())?,
            ParameterKind::Float => raw.trim().parse().map(Self::Float).map_err(|_| invalid())?,
            ParameterKind::String => Self::String(raw.to_string()),
            ParameterKind::Path => Self::Path(raw.to_string()),
        };
        Ok(Some(value))
    }

    /// Kind this value belongs to.
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Int(_) => ParameterKind::Int,
            ParameterValue::Float(_) => ParameterKind::Float,
            ParameterValue::String(_) => ParameterKind::String,
            ParameterValue::Path(_) => ParameterKind::Path,
        }
    }

    /// String encoding stored in [`ParameterDefinition::value`].
    pub fn encode(&self) -> String {
        match self {
            ParameterValue::Int(v) => v.to_string(),
            ParameterValue::Float(v) => v.to_string(),
            ParameterValue::String(v) | ParameterValue::Path(v) => v.clone(),
        }
    }
}

/// A job parameter: name, declared kind and string-encoded value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ParameterDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ParameterKind,

    /// Encoded value for `kind`; empty when unset
    #[serde(default)]
    pub value: String,
}

impl ParameterDefinition {
    pub fn new(name: impl Into<String>, kind: ParameterKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
        }
    }

    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self::from_value(name, &ParameterValue::Int(value))
    }

    pub fn float(name: impl Into<String>, value: f64) -> Self {
        Self::from_value(name, &ParameterValue::Float(value))
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::String, value)
    }

    pub fn path(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Path, value)
    }

    fn from_value(name: impl Into<String>, value: &ParameterValue) -> Self {
        Self::new(name, value.kind(), value.encode())
    }
}

/// A per-task parameter whose range holds one encoded entry per task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StepTaskParameterDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ParameterKind,

    /// Positional entries; empty when unset
    #[serde(default)]
    pub range: Vec<String>,
}

impl StepTaskParameterDefinition {
    pub fn new<I, S>(name: impl Into<String>, kind: ParameterKind, range: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            range: range.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered job parameter set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct JobParameters(pub Vec<ParameterDefinition>);

impl JobParameters {
    pub fn get(&self, name: &str) -> Option<&ParameterDefinition> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ParameterDefinition> {
        self.0.iter_mut().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sets the encoded value of an existing parameter after checking it
    /// against the declared kind. Returns `false` if no such parameter exists.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::InvalidInput` when `raw` is not a valid value for
    /// the parameter's kind.
    pub fn set_value(&mut self, name: &str, raw: &str) -> Result<bool> {
        let Some(parameter) = self.get_mut(name) else {
            return Ok(false);
        };
        ParameterValue::decode(name, parameter.kind, raw)?;
        parameter.value = raw.to_string();
        Ok(true)
    }
}

impl From<Vec<ParameterDefinition>> for JobParameters {
    fn from(parameters: Vec<ParameterDefinition>) -> Self {
        Self(parameters)
    }
}

/// Ordered step task parameter set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct StepParameters(pub Vec<StepTaskParameterDefinition>);

impl StepParameters {
    pub fn get(&self, name: &str) -> Option<&StepTaskParameterDefinition> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut StepTaskParameterDefinition> {
        self.0.iter_mut().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces the range of an existing task parameter, checking every entry
    /// against the declared kind. Returns `false` if no such parameter exists.
    ///
    /// # Errors
    ///
    /// Returns `JobkitError::InvalidInput` when an entry is not a valid value
    /// for the parameter's kind.
    pub fn set_range(&mut self, name: &str, range: Vec<String>) -> Result<bool> {
        let Some(parameter) = self.get_mut(name) else {
            return Ok(false);
        };
        for entry in &range {
            ParameterValue::decode(name, parameter.kind, entry)?;
        }
        parameter.range = range;
        Ok(true)
    }
}

impl From<Vec<StepTaskParameterDefinition>> for StepParameters {
    fn from(parameters: Vec<StepTaskParameterDefinition>) -> Self {
        Self(parameters)
    }
}

/// Environment variables keyed by unique name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct EnvironmentVariables(pub BTreeMap<String, String>);

impl EnvironmentVariables {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Inserts or overwrites a variable, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentVariables {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
