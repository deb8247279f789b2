//! [`ParameterShape`] adapters for job, step and environment parameter sets.

use std::path::Path;

use super::{ParameterShape, TemplateContents};
use crate::{
    models::{AssetKind, EnvironmentVariables, JobParameters, ParameterKind, StepParameters},
    template::{TemplateError, TemplateLoader},
};

impl ParameterShape for JobParameters {
    const KIND: AssetKind = AssetKind::Job;

    fn load_expected(
        loader: &dyn TemplateLoader,
        path: &Path,
    ) -> Result<TemplateContents<Self>, TemplateError> {
        let template = loader.load_job(path)?;
        Ok(TemplateContents {
            name: template.name,
            description: None,
            parameters: template.parameters,
        })
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entry_names(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.name.as_str()).collect()
    }

    fn entry_kind(&self, name: &str) -> Option<ParameterKind> {
        self.get(name).map(|p| p.kind)
    }

    fn entry_value(&self, name: &str) -> Option<String> {
        self.get(name).map(|p| p.value.clone())
    }

    fn entry_is_default(&self, name: &str, expected: &Self) -> bool {
        let Some(default) = expected.get(name) else {
            return true;
        };
        self.get(name).is_some_and(|p| p.value == default.value)
    }

    fn reset_entry(&mut self, name: &str, expected: &Self) -> bool {
        let default = expected.get(name).map(|p| p.value.clone());
        let Some(parameter) = self.get_mut(name) else {
            return false;
        };
        parameter.value = default.unwrap_or_default();
        true
    }

    fn preserve_overrides(&self, expected: Self) -> Self {
        let parameters = expected
            .0
            .into_iter()
            .map(|mut p| {
                if let Some(current) = self.get(&p.name).filter(|c| c.kind == p.kind) {
                    p.value = current.value.clone();
                }
                p
            })
            .collect();
        Self(parameters)
    }
}

impl ParameterShape for StepParameters {
    const KIND: AssetKind = AssetKind::Step;

    fn load_expected(
        loader: &dyn TemplateLoader,
        path: &Path,
    ) -> Result<TemplateContents<Self>, TemplateError> {
        let template = loader.load_step(path)?;
        Ok(TemplateContents {
            name: template.name,
            description: None,
            parameters: template.parameters,
        })
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entry_names(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.name.as_str()).collect()
    }

    fn entry_kind(&self, name: &str) -> Option<ParameterKind> {
        self.get(name).map(|p| p.kind)
    }

    fn entry_value(&self, name: &str) -> Option<String> {
        self.get(name).map(|p| p.range.join(","))
    }

    fn entry_is_default(&self, name: &str, expected: &Self) -> bool {
        let Some(default) = expected.get(name) else {
            return true;
        };
        // Vec equality covers both the length and every positional entry.
        self.get(name).is_some_and(|p| p.range == default.range)
    }

    fn reset_entry(&mut self, name: &str, expected: &Self) -> bool {
        let default = expected.get(name).map(|p| p.range.clone());
        let Some(parameter) = self.get_mut(name) else {
            return false;
        };
        match default {
            Some(range) => parameter.range = range,
            None => parameter.range.iter_mut().for_each(String::clear),
        }
        true
    }

    fn preserve_overrides(&self, expected: Self) -> Self {
        let parameters = expected
            .0
            .into_iter()
            .map(|mut p| {
                if let Some(current) = self.get(&p.name).filter(|c| c.kind == p.kind) {
                    p.range = current.range.clone();
                }
                p
            })
            .collect();
        Self(parameters)
    }
}

impl ParameterShape for EnvironmentVariables {
    const KIND: AssetKind = AssetKind::Environment;

    fn load_expected(
        loader: &dyn TemplateLoader,
        path: &Path,
    ) -> Result<TemplateContents<Self>, TemplateError> {
        let template = loader.load_environment(path)?;
        Ok(TemplateContents {
            name: template.name,
            description: template.description,
            parameters: template.variables,
        })
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entry_names(&self) -> Vec<&str> {
        self.iter().map(|(name, _)| name).collect()
    }

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn entry_kind(&self, _name: &str) -> Option<ParameterKind> {
        None
    }

    fn entry_value(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    fn entry_is_default(&self, name: &str, expected: &Self) -> bool {
        let Some(default) = expected.get(name) else {
            return true;
        };
        self.get(name) == Some(default)
    }

    fn reset_entry(&mut self, name: &str, expected: &Self) -> bool {
        if self.get(name).is_none() {
            return false;
        }
        let default = expected.get(name).unwrap_or_default().to_string();
        self.insert(name, default);
        true
    }

    fn preserve_overrides(&self, expected: Self) -> Self {
        expected
            .0
            .into_iter()
            .map(|(name, value)| {
                let value = self.get(&name).map(str::to_string).unwrap_or(value);
                (name, value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParameterDefinition, StepTaskParameterDefinition};

    fn chunk_size(range: [&str; 3]) -> StepParameters {
        StepParameters(vec![StepTaskParameterDefinition::new(
            "ChunkSize",
            ParameterKind::Int,
            range,
        )])
    }

    #[test]
    fn test_job_default_comparison_is_vacuous_for_unknown_names() {
        let current = JobParameters(vec![ParameterDefinition::string("Orphan", "x")]);
        let expected = JobParameters::default();
        assert!(current.entry_is_default("Orphan", &expected));
    }

    #[test]
    fn test_step_reset_clears_entries_missing_from_template() {
        let mut current = chunk_size(["9", "9", "9"]);
        assert!(current.reset_entry("ChunkSize", &StepParameters::default()));
        assert_eq!(current.get("ChunkSize").unwrap().range, vec!["", "", ""]);
        assert!(!current.reset_entry("Missing", &StepParameters::default()));
    }

    #[test]
    fn test_step_default_compares_length_and_elements() {
        let expected = chunk_size(["1", "2", "3"]);
        assert!(chunk_size(["1", "2", "3"]).entry_is_default("ChunkSize", &expected));
        assert!(!chunk_size(["1", "2", "4"]).entry_is_default("ChunkSize", &expected));

        let shorter = StepParameters(vec![StepTaskParameterDefinition::new(
            "ChunkSize",
            ParameterKind::Int,
            ["1", "2"],
        )]);
        assert!(!shorter.entry_is_default("ChunkSize", &expected));
        assert_eq!(expected.entry_value("ChunkSize").as_deref(), Some("1,2,3"));
    }

    #[test]
    fn test_preserve_overrides_requires_matching_kind() {
        let current = JobParameters(vec![
            ParameterDefinition::string("Priority", "high"),
            ParameterDefinition::path("OutputDir", "/renders/custom"),
            ParameterDefinition::string("Removed", "x"),
        ]);
        let expected = JobParameters(vec![
            ParameterDefinition::path("OutputDir", "/renders"),
            ParameterDefinition::int("Priority", 50),
        ]);

        let merged = current.preserve_overrides(expected);
        assert_eq!(
            merged.0,
            vec![
                ParameterDefinition::path("OutputDir", "/renders/custom"),
                ParameterDefinition::int("Priority", 50),
            ]
        );
    }

    #[test]
    fn test_environment_reset_and_merge() {
        let mut current: EnvironmentVariables =
            [("REZ_PACKAGES", "custom"), ("EXTRA", "1")].into_iter().collect();
        let expected: EnvironmentVariables =
            [("REZ_PACKAGES", "unreal"), ("UE_LOG", "quiet")].into_iter().collect();

        assert!(!current.entry_is_default("REZ_PACKAGES", &expected));
        assert!(current.entry_is_default("EXTRA", &expected));

        let merged = current.preserve_overrides(expected.clone());
        assert_eq!(merged.get("REZ_PACKAGES"), Some("custom"));
        assert_eq!(merged.get("UE_LOG"), Some("quiet"));
        assert_eq!(merged.get("EXTRA"), None);

        assert!(current.reset_entry("REZ_PACKAGES", &expected));
        assert!(current.reset_entry("EXTRA", &expected));
        assert_eq!(current.get("REZ_PACKAGES"), Some("unreal"));
        assert_eq!(current.get("EXTRA"), Some(""));
    }
}
