//! Structural comparison of a parameter set against its template.

use std::collections::HashSet;

use super::ParameterShape;
use crate::models::{ConsistencyCheckResult, ShapeDiff, ShapeKey};

/// Decides whether `current` still has the shape `expected` declares.
///
/// The comparison is coarse on purpose: the count must match and every
/// expected name must be present. Kinds and values are not compared. The
/// reason carries the first diagnostic encountered.
///
/// # Examples
///
/// ```rust
/// use jobkit_core::{
///     models::{JobParameters, ParameterDefinition},
///     reconcile::check_consistency,
/// };
///
/// let expected = JobParameters(vec![
///     ParameterDefinition::path("ProjectFilePath", ""),
///     ParameterDefinition::path("OutputDir", ""),
/// ]);
/// let current = JobParameters(vec![ParameterDefinition::path("OutputDir", "/out")]);
///
/// let result = check_consistency(&current, &expected);
/// assert!(!result.passed);
/// assert_eq!(
///     result.reason,
///     "Parameter count mismatch: data asset has 1, template has 2"
/// );
/// ```
pub fn check_consistency<S: ParameterShape>(current: &S, expected: &S) -> ConsistencyCheckResult {
    let (have, want) = (current.entry_count(), expected.entry_count());
    if have != want {
        return ConsistencyCheckResult::failed(format!(
            "Parameter count mismatch: data asset has {have}, template has {want}"
        ));
    }

    match expected
        .entry_names()
        .into_iter()
        .find(|name| !current.contains(name))
    {
        Some(missing) => ConsistencyCheckResult::failed(format!(
            "Template parameter '{missing}' is missing from the data asset"
        )),
        None => ConsistencyCheckResult::passed(),
    }
}

/// Computes the divergence between `current` and `expected`, by name.
///
/// Entries present on both sides under different kinds are listed in
/// `kind_changed` rather than on either missing side.
pub fn diff<S: ParameterShape>(current: &S, expected: &S) -> ShapeDiff {
    let current_names: HashSet<&str> = current.entry_names().into_iter().collect();
    let expected_names: HashSet<&str> = expected.entry_names().into_iter().collect();

    let missing_in_asset = expected
        .entry_names()
        .into_iter()
        .filter(|name| !current_names.contains(name))
        .map(|name| ShapeKey::new(name, expected.entry_kind(name)))
        .collect();

    let missing_in_template = current
        .entry_names()
        .into_iter()
        .filter(|name| !expected_names.contains(name))
        .map(|name| ShapeKey::new(name, current.entry_kind(name)))
        .collect();

    let kind_changed = expected
        .entry_names()
        .into_iter()
        .filter(|name| current_names.contains(name))
        .filter(|name| current.entry_kind(name) != expected.entry_kind(name))
        .map(str::to_string)
        .collect();

    ShapeDiff {
        missing_in_asset,
        missing_in_template,
        kind_changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EnvironmentVariables, JobParameters, ParameterDefinition, ParameterKind, StepParameters,
        StepTaskParameterDefinition,
    };

    fn template_job() -> JobParameters {
        JobParameters(vec![
            ParameterDefinition::path("ProjectFilePath", ""),
            ParameterDefinition::path("OutputDir", ""),
            ParameterDefinition::int("Priority", 50),
        ])
    }

    #[test]
    fn test_matching_shape_passes_regardless_of_values() {
        let mut current = template_job();
        current.0.reverse();
        current.0[0].value = "99".to_string();

        let result = check_consistency(&current, &template_job());
        assert!(result.passed);
        assert!(result.reason.is_empty());
    }

    #[test]
    fn test_count_mismatch_in_both_directions() {
        let expected = template_job();

        let mut fewer = expected.clone();
        fewer.0.pop();
        let result = check_consistency(&fewer, &expected);
        assert!(!result.passed);
        assert!(result.reason.contains("count mismatch"));

        let mut more = expected.clone();
        more.0.push(ParameterDefinition::string("Extra", ""));
        let result = check_consistency(&more, &expected);
        assert!(!result.passed);
        assert_eq!(
            result.reason,
            "Parameter count mismatch: data asset has 4, template has 3"
        );
    }

    #[test]
    fn test_renamed_parameter_is_named_in_reason() {
        let expected = template_job();
        let mut renamed = expected.clone();
        renamed.0[1].name = "OutputDirectory".to_string();

        let result = check_consistency(&renamed, &expected);
        assert!(!result.passed);
        assert_eq!(
            result.reason,
            "Template parameter 'OutputDir' is missing from the data asset"
        );
    }

    #[test]
    fn test_kind_changes_do_not_fail_the_check() {
        let expected = template_job();
        let mut retyped = expected.clone();
        retyped.0[2].kind = ParameterKind::String;

        assert!(check_consistency(&retyped, &expected).passed);
        assert_eq!(diff(&retyped, &expected).kind_changed, vec!["Priority"]);
    }

    #[test]
    fn test_empty_sets() {
        let empty = JobParameters::default();
        assert!(check_consistency(&empty, &empty).passed);
        assert!(!check_consistency(&empty, &template_job()).passed);

        let variables: EnvironmentVariables = [("A", "1")].into_iter().collect();
        assert!(!check_consistency(&EnvironmentVariables::default(), &variables).passed);
    }

    #[test]
    fn test_step_range_divergence_does_not_fail_the_check() {
        let expected = StepParameters(vec![StepTaskParameterDefinition::new(
            "ChunkSize",
            ParameterKind::Int,
            ["1", "2", "3"],
        )]);
        let current = StepParameters(vec![StepTaskParameterDefinition::new(
            "ChunkSize",
            ParameterKind::Int,
            Vec::<String>::new(),
        )]);
        assert!(check_consistency(&current, &expected).passed);
    }

    #[test]
    fn test_diff_reports_both_sides() {
        let expected = template_job();
        let current = JobParameters(vec![
            ParameterDefinition::path("OutputDir", "/out"),
            ParameterDefinition::int("Priority", 1),
            ParameterDefinition::string("Legacy", ""),
        ]);

        let diff = diff(&current, &expected);
        assert_eq!(
            diff.missing_in_asset,
            vec![ShapeKey::new("ProjectFilePath", Some(ParameterKind::Path))]
        );
        assert_eq!(
            diff.missing_in_template,
            vec![ShapeKey::new("Legacy", Some(ParameterKind::String))]
        );
        assert!(diff.kind_changed.is_empty());
        assert!(!diff.is_empty());
    }
}
