//! Tests for the workbench module.

use std::fs;

use tempfile::TempDir;

use super::{builder::WorkbenchBuilder, Workbench};
use crate::{
    error::JobkitError,
    graph::DependencyError,
    models::{Asset, AssetKind, StepAsset},
    params::{
        AssetRef, CreateAsset, LinkAssets, ListAssets, ParameterRef, RetargetAsset,
        SetDependencies, SetParameter,
    },
    reconcile::FixStrategy,
};

const JOB_TEMPLATE: &str = "\
name: Render Job
parameterDefinitions:
  - name: ProjectFilePath
    type: PATH
    default: /projects/Meerkat.uproject
  - name: OutputDir
    type: PATH
    default: /renders
";

const STEP_TEMPLATE: &str = "\
name: Render
parameterSpace:
  taskParameterDefinitions:
    - name: ChunkSize
      type: INT
      range: \"1-3\"
";

const ENVIRONMENT_TEMPLATE: &str = "\
name: Launch Editor
variables:
  REZ_PACKAGES: unreal
";

/// Helper function to create a test workbench with templates in place
fn create_test_workbench(strategy: FixStrategy) -> (TempDir, Workbench) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for (file, contents) in [
        ("job.yml", JOB_TEMPLATE),
        ("step.yml", STEP_TEMPLATE),
        ("env.yml", ENVIRONMENT_TEMPLATE),
    ] {
        fs::write(temp_dir.path().join(file), contents).expect("Failed to write template");
    }

    let workbench = WorkbenchBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_templates_dir(Some(temp_dir.path()))
        .with_fix_strategy(strategy)
        .build()
        .expect("Failed to create workbench");
    (temp_dir, workbench)
}

fn create(workbench: &mut Workbench, kind: AssetKind, name: &str, template: &str) -> Asset {
    workbench
        .create_asset(&CreateAsset {
            kind,
            name: name.to_string(),
            template_path: template.into(),
        })
        .expect("Failed to create asset")
}

fn job_ref() -> AssetRef {
    AssetRef::new(AssetKind::Job, "Render Job")
}

fn step(workbench: &mut Workbench, name: &str, depends_on: &[&str]) {
    create(workbench, AssetKind::Step, name, "step.yml");
    if !depends_on.is_empty() {
        workbench
            .set_step_dependencies(&SetDependencies {
                step: name.to_string(),
                depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
            })
            .expect("Failed to set dependencies");
    }
}

#[test]
fn test_create_loads_template_parameters() {
    let (_temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);

    let Asset::Step(step) = create(&mut workbench, AssetKind::Step, "Render", "step.yml") else {
        panic!("Expected a step");
    };
    assert_eq!(step.parameters.get("ChunkSize").unwrap().range, vec!["1", "2", "3"]);

    let stored = workbench
        .get_asset(&AssetRef::new(AssetKind::Step, "Render"))
        .unwrap();
    assert_eq!(stored, Asset::Step(step));
}

#[test]
fn test_create_rejects_duplicates_and_bad_templates() {
    let (_temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);
    create(&mut workbench, AssetKind::Job, "Render Job", "job.yml");

    let duplicate = workbench.create_asset(&CreateAsset {
        kind: AssetKind::Job,
        name: "Render Job".to_string(),
        template_path: "job.yml".into(),
    });
    assert!(matches!(duplicate, Err(JobkitError::AssetExists { .. })));

    let missing = workbench.create_asset(&CreateAsset {
        kind: AssetKind::Job,
        name: "Other".to_string(),
        template_path: "missing.yml".into(),
    });
    assert!(matches!(missing, Err(JobkitError::Template(_))));
    assert_eq!(workbench.list_assets(&ListAssets::default()).unwrap().len(), 1);
}

#[test]
fn test_check_fix_round_trip_through_library() {
    let (temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);
    create(&mut workbench, AssetKind::Job, "Render Job", "job.yml");

    fs::write(
        temp_dir.path().join("job.yml"),
        format!("{JOB_TEMPLATE}  - name: Priority\n    type: INT\n    default: 50\n"),
    )
    .expect("Failed to rewrite template");

    let report = workbench.check_asset(&job_ref()).unwrap();
    assert!(!report.result.passed);
    assert_eq!(report.diff.missing_in_asset.len(), 1);

    let fixed = workbench.fix_asset(&job_ref()).unwrap();
    assert_eq!(fixed.repaired.missing_in_asset[0].name, "Priority");
    assert!(fixed.after.result.passed);
    assert!(workbench.check_asset(&job_ref()).unwrap().result.passed);
}

#[test]
fn test_fix_with_preserve_overrides_keeps_edits() {
    let (temp_dir, mut workbench) = create_test_workbench(FixStrategy::PreserveOverrides);
    create(&mut workbench, AssetKind::Job, "Render Job", "job.yml");
    workbench
        .set_parameter(&SetParameter {
            asset: job_ref(),
            parameter: "OutputDir".to_string(),
            value: "/renders/shot010".to_string(),
        })
        .unwrap();

    fs::write(
        temp_dir.path().join("job.yml"),
        format!("{JOB_TEMPLATE}  - name: Priority\n    type: INT\n    default: 50\n"),
    )
    .expect("Failed to rewrite template");
    workbench.fix_asset(&job_ref()).unwrap();

    let Asset::Job(job) = workbench.get_asset(&job_ref()).unwrap() else {
        panic!("Expected a job");
    };
    assert_eq!(job.parameters.get("OutputDir").unwrap().value, "/renders/shot010");
    assert_eq!(job.parameters.get("Priority").unwrap().value, "50");
}

#[test]
fn test_set_and_reset_parameters() {
    let (_temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);
    create(&mut workbench, AssetKind::Step, "Render", "step.yml");
    let step_ref = AssetRef::new(AssetKind::Step, "Render");
    let chunk_size = ParameterRef {
        asset: step_ref.clone(),
        parameter: "ChunkSize".to_string(),
    };

    workbench
        .set_parameter(&SetParameter {
            asset: step_ref.clone(),
            parameter: "ChunkSize".to_string(),
            value: "9, 9, 9".to_string(),
        })
        .unwrap();
    let report = workbench.check_asset(&step_ref).unwrap();
    assert!(report.result.passed);
    assert_eq!(report.non_default, vec!["ChunkSize"]);
    assert_eq!(workbench.default_value(&chunk_size).unwrap(), "1,2,3");

    let bad = workbench.set_parameter(&SetParameter {
        asset: step_ref.clone(),
        parameter: "ChunkSize".to_string(),
        value: "1,two".to_string(),
    });
    assert!(matches!(bad, Err(JobkitError::InvalidInput { .. })));

    let missing = workbench.set_parameter(&SetParameter {
        asset: step_ref.clone(),
        parameter: "FrameRange".to_string(),
        value: "1".to_string(),
    });
    assert!(matches!(missing, Err(JobkitError::ParameterNotFound { .. })));

    let Asset::Step(step) = workbench.reset_parameter(&chunk_size).unwrap() else {
        panic!("Expected a step");
    };
    assert_eq!(step.parameters.get("ChunkSize").unwrap().range, vec!["1", "2", "3"]);
    assert!(workbench.check_asset(&step_ref).unwrap().non_default.is_empty());
}

#[test]
fn test_retarget_reloads_or_leaves_asset_untouched() {
    let (temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);
    create(&mut workbench, AssetKind::Job, "Render Job", "job.yml");
    fs::write(
        temp_dir.path().join("job_v2.yml"),
        "parameterDefinitions:\n  - name: OutputDir\n    type: PATH\n",
    )
    .expect("Failed to write template");

    let failed = workbench.retarget_asset(&RetargetAsset {
        asset: job_ref(),
        template_path: "missing.yml".into(),
    });
    assert!(failed.is_err());
    let unchanged = workbench.get_asset(&job_ref()).unwrap();
    assert_eq!(unchanged.template_path().to_str(), Some("job.yml"));

    let Asset::Job(job) = workbench
        .retarget_asset(&RetargetAsset {
            asset: job_ref(),
            template_path: "job_v2.yml".into(),
        })
        .unwrap()
    else {
        panic!("Expected a job");
    };
    assert_eq!(job.parameters.len(), 1);
    assert!(workbench.check_asset(&job_ref()).unwrap().result.passed);
}

#[test]
fn test_link_and_unlink() {
    let (_temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);
    create(&mut workbench, AssetKind::Job, "Render Job", "job.yml");
    create(&mut workbench, AssetKind::Step, "Render", "step.yml");
    create(&mut workbench, AssetKind::Environment, "Launch Editor", "env.yml");

    let link = |steps: &[&str], environments: &[&str], unlink: bool| LinkAssets {
        target: job_ref(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        environments: environments.iter().map(|s| s.to_string()).collect(),
        unlink,
    };

    let Asset::Job(job) = workbench
        .link_assets(&link(&["Render", "Render"], &["Launch Editor"], false))
        .unwrap()
    else {
        panic!("Expected a job");
    };
    assert_eq!(job.steps, vec!["Render"]);
    assert_eq!(job.environments, vec!["Launch Editor"]);

    let unknown = workbench.link_assets(&link(&["Bake"], &[], false));
    assert!(matches!(unknown, Err(JobkitError::AssetNotFound { .. })));

    let Asset::Job(job) = workbench.link_assets(&link(&["Render"], &[], true)).unwrap() else {
        panic!("Expected a job");
    };
    assert!(job.steps.is_empty());
    assert_eq!(job.environments, vec!["Launch Editor"]);
}

#[test]
fn test_step_dependencies_reject_cycles() {
    let (_temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);
    step(&mut workbench, "Render", &[]);
    step(&mut workbench, "Composite", &["Render"]);

    let cycle = workbench.set_step_dependencies(&SetDependencies {
        step: "Render".to_string(),
        depends_on: vec!["Composite".to_string()],
    });
    assert!(matches!(
        cycle,
        Err(JobkitError::Dependency(DependencyError::Cycle { .. }))
    ));

    let itself = workbench.set_step_dependencies(&SetDependencies {
        step: "Render".to_string(),
        depends_on: vec!["Render".to_string()],
    });
    assert!(matches!(
        itself,
        Err(JobkitError::Dependency(DependencyError::SelfDependency(_)))
    ));

    let stored: StepAsset = workbench.load("Render").unwrap();
    assert!(stored.depends_on.is_empty());
}

#[test]
fn test_validate_job() {
    let (temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);
    create(&mut workbench, AssetKind::Job, "Render Job", "job.yml");
    create(&mut workbench, AssetKind::Environment, "Launch Editor", "env.yml");
    step(&mut workbench, "Render", &[]);
    step(&mut workbench, "Composite", &["Render"]);
    workbench
        .link_assets(&LinkAssets {
            target: AssetRef::new(AssetKind::Step, "Render"),
            steps: vec![],
            environments: vec!["Launch Editor".to_string()],
            unlink: false,
        })
        .unwrap();
    workbench
        .link_assets(&LinkAssets {
            target: job_ref(),
            steps: vec!["Composite".to_string(), "Render".to_string()],
            environments: vec![],
            unlink: false,
        })
        .unwrap();

    let validation = workbench.validate_job("Render Job").unwrap();
    assert_eq!(validation.execution_order, vec!["Render", "Composite"]);
    assert_eq!(validation.environments, vec!["Launch Editor"]);

    fs::write(
        temp_dir.path().join("env.yml"),
        "variables:\n  REZ_PACKAGES: unreal\n  UE_LOG: quiet\n",
    )
    .expect("Failed to rewrite template");
    let err = workbench.validate_job("Render Job").unwrap_err();
    assert!(matches!(
        err,
        JobkitError::ParametersNotConsistent {
            kind: AssetKind::Environment,
            ..
        }
    ));
}

#[test]
fn test_validate_job_requires_linked_steps_in_job() {
    let (_temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);
    create(&mut workbench, AssetKind::Job, "Render Job", "job.yml");
    step(&mut workbench, "Render", &[]);
    step(&mut workbench, "Composite", &["Render"]);
    workbench
        .link_assets(&LinkAssets {
            target: job_ref(),
            steps: vec!["Composite".to_string()],
            environments: vec![],
            unlink: false,
        })
        .unwrap();

    let err = workbench.validate_job("Render Job").unwrap_err();
    assert!(matches!(
        err,
        JobkitError::Dependency(DependencyError::UnknownStep { .. })
    ));
}

#[test]
fn test_delete_asset() {
    let (_temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);
    create(&mut workbench, AssetKind::Job, "Render Job", "job.yml");

    let deleted = workbench.delete_asset(&job_ref()).unwrap();
    assert_eq!(deleted.name(), "Render Job");
    assert!(matches!(
        workbench.get_asset(&job_ref()),
        Err(JobkitError::AssetNotFound { .. })
    ));
}

#[test]
fn test_deleted_dependency_only_blocks_its_dependants() {
    let (_temp_dir, mut workbench) = create_test_workbench(FixStrategy::Reset);
    step(&mut workbench, "Render", &[]);
    step(&mut workbench, "Composite", &["Render"]);
    step(&mut workbench, "Audit", &[]);
    step(&mut workbench, "Bake", &[]);

    workbench
        .delete_asset(&AssetRef::new(AssetKind::Step, "Render"))
        .unwrap();

    let audit = workbench
        .set_step_dependencies(&SetDependencies {
            step: "Audit".to_string(),
            depends_on: vec!["Bake".to_string()],
        })
        .unwrap();
    assert_eq!(audit.depends_on, vec!["Bake"]);

    let through_composite = workbench.set_step_dependencies(&SetDependencies {
        step: "Bake".to_string(),
        depends_on: vec!["Composite".to_string()],
    });
    assert!(matches!(
        through_composite,
        Err(JobkitError::Dependency(DependencyError::UnknownStep { .. }))
    ));

    let cleared = workbench
        .set_step_dependencies(&SetDependencies {
            step: "Composite".to_string(),
            depends_on: Vec::new(),
        })
        .unwrap();
    assert!(cleared.depends_on.is_empty());
}
