use jobkit_core::{
    models::{EnvironmentAsset, JobAsset, ParameterDefinition},
    AssetKind, Database, JobkitError,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();

    assert!(temp_file.path().exists());
    assert_eq!(db.schema_version().unwrap(), 1);
    assert!(db.list_assets(None).unwrap().is_empty());
}

#[test]
fn test_assets_survive_reopening() {
    let (temp_file, mut db) = create_test_db();
    let mut job = JobAsset::new("Render Job", "job.yml");
    job.parameters.0 = vec![ParameterDefinition::path("OutputDir", "/renders")];
    db.insert_asset(&job).expect("Failed to insert job");
    drop(db);

    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(db.schema_version().unwrap(), 1);
    let stored = db
        .get_asset::<JobAsset>("Render Job")
        .expect("Failed to get job")
        .expect("Job should exist");
    assert_eq!(stored, job);
}

#[test]
fn test_list_is_ordered_by_kind_then_name() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_asset(&JobAsset::new("Zeta", "job.yml")).unwrap();
    db.insert_asset(&JobAsset::new("Alpha", "job.yml")).unwrap();
    db.insert_asset(&EnvironmentAsset::new("Launch Editor", "env.yml"))
        .unwrap();

    let listed: Vec<_> = db
        .list_assets(None)
        .unwrap()
        .into_iter()
        .map(|summary| (summary.kind, summary.name))
        .collect();
    assert_eq!(
        listed,
        vec![
            (AssetKind::Environment, "Launch Editor".to_string()),
            (AssetKind::Job, "Alpha".to_string()),
            (AssetKind::Job, "Zeta".to_string()),
        ]
    );
}

#[test]
fn test_duplicate_insert_is_rejected() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_asset(&JobAsset::new("Render Job", "job.yml"))
        .unwrap();

    let err = db
        .insert_asset(&JobAsset::new("Render Job", "other.yml"))
        .unwrap_err();
    assert_eq!(err.to_string(), "job 'Render Job' already exists");
    assert!(matches!(err, JobkitError::AssetExists { .. }));
}
