//! Display implementations for domain models.
//!
//! Assets render as markdown: a heading, a metadata list, and a parameter
//! table. Check results render with the same status icons the CLI uses for
//! every consistency verdict.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    Asset, AssetKind, AssetSummary, ConsistencyCheckResult, ConsistencyReport, EnvironmentAsset,
    FixReport, JobAsset, JobValidation, ParameterKind, ShapeDiff, ShapeKey, StepAsset,
};

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Escapes a value for use inside a markdown table cell.
fn cell(value: &str) -> String {
    if value.is_empty() {
        "*(unset)*".to_string()
    } else {
        value.replace('|', "\\|")
    }
}

fn write_names(f: &mut fmt::Formatter<'_>, label: &str, names: &[String]) -> fmt::Result {
    if names.is_empty() {
        writeln!(f, "- {label}: none")
    } else {
        writeln!(f, "- {label}: {}", names.join(", "))
    }
}

impl fmt::Display for JobAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (job)", self.name)?;
        writeln!(f)?;
        writeln!(f, "- Template: {}", self.template_path.display())?;
        write_names(f, "Steps", &self.steps)?;
        write_names(f, "Environments", &self.environments)?;
        writeln!(f)?;

        if self.parameters.is_empty() {
            return writeln!(f, "No parameters.");
        }
        writeln!(f, "## Parameters")?;
        writeln!(f)?;
        writeln!(f, "| Name | Type | Value |")?;
        writeln!(f, "|------|------|-------|")?;
        for parameter in &self.parameters.0 {
            writeln!(
                f,
                "| {} | {} | {} |",
                parameter.name,
                parameter.kind,
                cell(&parameter.value)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for StepAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (step)", self.name)?;
        writeln!(f)?;
        writeln!(f, "- Template: {}", self.template_path.display())?;
        write_names(f, "Depends on", &self.depends_on)?;
        write_names(f, "Environments", &self.environments)?;
        writeln!(f)?;

        if self.parameters.is_empty() {
            return writeln!(f, "No task parameters.");
        }
        writeln!(f, "## Task Parameters")?;
        writeln!(f)?;
        writeln!(f, "| Name | Type | Range |")?;
        writeln!(f, "|------|------|-------|")?;
        for parameter in &self.parameters.0 {
            writeln!(
                f,
                "| {} | {} | {} |",
                parameter.name,
                parameter.kind,
                cell(&parameter.range.join(", "))
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for EnvironmentAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (environment)", self.name)?;
        writeln!(f)?;
        writeln!(f, "- Template: {}", self.template_path.display())?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }
        writeln!(f)?;

        if self.variables.is_empty() {
            return writeln!(f, "No variables.");
        }
        writeln!(f, "## Variables")?;
        writeln!(f)?;
        writeln!(f, "| Name | Value |")?;
        writeln!(f, "|------|-------|")?;
        for (name, value) in self.variables.iter() {
            writeln!(f, "| {name} | {} |", cell(value))?;
        }
        Ok(())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Job(job) => write!(f, "{job}"),
            Asset::Step(step) => write!(f, "{step}"),
            Asset::Environment(env) => write!(f, "{env}"),
        }
    }
}

impl fmt::Display for ConsistencyCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            write!(f, "✓ Consistent with template")
        } else {
            write!(f, "✗ Not consistent: {}", self.reason)
        }
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{} ({kind})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl fmt::Display for ShapeDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No differences.");
        }
        for key in &self.missing_in_asset {
            writeln!(f, "- Missing from asset: {key}")?;
        }
        for key in &self.missing_in_template {
            writeln!(f, "- No longer in template: {key}")?;
        }
        for name in &self.kind_changed {
            writeln!(f, "- Type changed: {name}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} '{}'", self.kind, self.name)?;
        writeln!(f)?;
        writeln!(f, "{}", self.result)?;

        if !self.diff.is_empty() {
            writeln!(f)?;
            writeln!(f, "### Differences")?;
            writeln!(f)?;
            write!(f, "{}", self.diff)?;
        }

        if !self.non_default.is_empty() {
            writeln!(f)?;
            writeln!(f, "### Overridden")?;
            writeln!(f)?;
            for name in &self.non_default {
                writeln!(f, "- {name}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for FixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repaired.is_empty() {
            writeln!(f, "Nothing to repair.")?;
        } else {
            writeln!(f, "### Repaired")?;
            writeln!(f)?;
            write!(f, "{}", self.repaired)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.after)
    }
}

impl fmt::Display for JobValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "✓ Job '{}' is ready for submission", self.job)?;
        writeln!(f)?;

        writeln!(f, "## Execution Order")?;
        writeln!(f)?;
        if self.execution_order.is_empty() {
            writeln!(f, "No steps.")?;
        }
        for (position, step) in self.execution_order.iter().enumerate() {
            writeln!(f, "{}. {step}", position + 1)?;
        }

        if !self.environments.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Environments")?;
            writeln!(f)?;
            for env in &self.environments {
                writeln!(f, "- {env}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for AssetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({}, ID: {})", self.name, self.kind, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Template**: {}", self.template_path)?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{ParameterDefinition, StepTaskParameterDefinition};

    #[test]
    fn test_kind_display() {
        assert_eq!(ParameterKind::Path.to_string(), "PATH");
        assert_eq!(AssetKind::Environment.to_string(), "environment");
    }

    #[test]
    fn test_job_display() {
        let mut job = JobAsset::new("Render Job", "job.yml");
        job.parameters.0 = vec![
            ParameterDefinition::path("OutputDir", "/renders"),
            ParameterDefinition::string("Notes", ""),
        ];
        job.steps = vec!["Render".to_string()];

        let output = job.to_string();
        assert!(output.starts_with("# Render Job (job)\n"));
        assert!(output.contains("- Steps: Render"));
        assert!(output.contains("- Environments: none"));
        assert!(output.contains("| OutputDir | PATH | /renders |"));
        assert!(output.contains("| Notes | STRING | *(unset)* |"));
    }

    #[test]
    fn test_step_and_environment_display() {
        let mut step = StepAsset::new("Render", "step.yml");
        step.parameters.0 = vec![StepTaskParameterDefinition::new(
            "ChunkSize",
            ParameterKind::Int,
            ["1", "2"],
        )];
        assert!(Asset::from(step).to_string().contains("| ChunkSize | INT | 1, 2 |"));

        let mut env = EnvironmentAsset::new("Launch Editor", "env.yml");
        assert!(env.to_string().contains("No variables."));
        env.description = "Starts the editor".to_string();
        env.variables.insert("FLAGS", "a|b");
        let output = env.to_string();
        assert!(output.contains("Starts the editor"));
        assert!(output.contains("| FLAGS | a\\|b |"));
    }

    #[test]
    fn test_report_display() {
        let report = ConsistencyReport {
            kind: AssetKind::Job,
            name: "Render Job".to_string(),
            result: ConsistencyCheckResult::failed("Parameter count mismatch"),
            diff: ShapeDiff {
                missing_in_asset: vec![ShapeKey::new("Priority", Some(ParameterKind::Int))],
                missing_in_template: vec![ShapeKey::new("UE_LOG", None)],
                kind_changed: vec![],
            },
            non_default: vec!["OutputDir".to_string()],
        };

        let output = report.to_string();
        assert!(output.contains("## job 'Render Job'"));
        assert!(output.contains("✗ Not consistent: Parameter count mismatch"));
        assert!(output.contains("- Missing from asset: Priority (INT)"));
        assert!(output.contains("- No longer in template: UE_LOG\n"));
        assert!(output.contains("### Overridden"));

        let fixed = FixReport {
            repaired: report.diff.clone(),
            after: ConsistencyReport {
                result: ConsistencyCheckResult::passed(),
                diff: ShapeDiff::default(),
                non_default: vec![],
                ..report
            },
        };
        let output = fixed.to_string();
        assert!(output.contains("### Repaired"));
        assert!(output.contains("✓ Consistent with template"));
        assert!(!output.contains("### Differences"));
    }

    #[test]
    fn test_validation_and_summary_display() {
        let validation = JobValidation {
            job: "Render Job".to_string(),
            execution_order: vec!["Render".to_string(), "Composite".to_string()],
            environments: vec![],
        };
        let output = validation.to_string();
        assert!(output.contains("1. Render\n2. Composite\n"));
        assert!(!output.contains("## Environments"));

        let summary = AssetSummary {
            id: 7,
            kind: AssetKind::Step,
            name: "Render".to_string(),
            template_path: "step.yml".to_string(),
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            updated_at: Timestamp::from_second(1_640_995_200).unwrap(),
        };
        let output = summary.to_string();
        assert!(output.starts_with("## Render (step, ID: 7)"));
        assert!(output.contains("- **Template**: step.yml"));
    }
}
