use std::{fs, path::Path};

use jobkit_core::{FixStrategy, Workbench, WorkbenchBuilder};
use tempfile::TempDir;

pub const JOB_TEMPLATE: &str = "\
specificationVersion: jobtemplate-2023-09
name: Render Job
parameterDefinitions:
  - name: ProjectFilePath
    type: PATH
    default: /projects/Meerkat.uproject
  - name: OutputDir
    type: PATH
    default: /renders
";

pub const STEP_TEMPLATE: &str = "\
name: Render
parameterSpace:
  taskParameterDefinitions:
    - name: ChunkSize
      type: INT
      range: \"1-3\"
";

pub const ENVIRONMENT_TEMPLATE: &str = "\
specificationVersion: environment-2023-09
environment:
  name: Launch Editor
  description: Starts the editor
  variables:
    REZ_PACKAGES: unreal
";

/// Writes a template file into the templates directory.
#[allow(dead_code)]
pub fn write_template(dir: &Path, file: &str, contents: &str) {
    fs::write(dir.join(file), contents).expect("Failed to write template");
}

/// Helper function to create a test workbench over a fresh template directory
#[allow(dead_code)]
pub fn create_test_workbench(cache_templates: bool) -> (TempDir, Workbench) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_template(temp_dir.path(), "job.yml", JOB_TEMPLATE);
    write_template(temp_dir.path(), "step.yml", STEP_TEMPLATE);
    write_template(temp_dir.path(), "env.yml", ENVIRONMENT_TEMPLATE);

    let workbench = WorkbenchBuilder::new()
        .with_database_path(Some(temp_dir.path().join("data/test.db")))
        .with_templates_dir(Some(temp_dir.path()))
        .with_template_cache(cache_templates)
        .with_fix_strategy(FixStrategy::Reset)
        .build()
        .expect("Failed to create workbench");
    (temp_dir, workbench)
}
