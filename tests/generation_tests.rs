// Integration tests for the persistence layer and the headless flow:
// save a pipeline file, load it back, generate a job folder, and check
// what landed on disk.

use std::fs;

use pipesmith::{generate_all, BlockCatalog, Pipeline};
use tempfile::tempdir;

#[test]
fn test_full_headless_flow() {
    let dir = tempdir().unwrap();
    let catalog = BlockCatalog::with_builtin_blocks();

    // Author a pipeline and save it the way the TUI does
    let pipeline = Pipeline::from_ids(["read_excel", "aggregate_input", "write_excel"]);
    let pipeline_path = dir.path().join("pipeline.json");
    pipeline.save_to_file(&pipeline_path).unwrap();

    // Reload and generate, as `pipesmith generate` does
    let loaded = Pipeline::load_from_file(&pipeline_path).unwrap();
    assert_eq!(loaded, pipeline);

    let job = dir.path().join("jobs").join("monthly_report");
    let script_path = generate_all(&catalog, &loaded, &job, true).unwrap();

    assert_eq!(script_path, job.join("run.py"));
    assert!(job.join(".env").is_file());
    assert!(job.join("IN").is_dir());
    assert!(job.join("OUT").is_dir());
    assert!(job.join("utils").join("data_management.py").is_file());

    let script = fs::read_to_string(&script_path).unwrap();
    assert!(script.contains("def main():"));
    assert!(script.contains("    # AGGREGATE_INPUT"));
    assert!(script.ends_with("    run_main(main)\n"));
}

#[test]
fn test_regeneration_is_stable() {
    let dir = tempdir().unwrap();
    let catalog = BlockCatalog::with_builtin_blocks();
    let pipeline = Pipeline::from_ids(["clear_folder", "read_excel", "write_excel"]);

    generate_all(&catalog, &pipeline, dir.path(), false).unwrap();
    let first_script = fs::read_to_string(dir.path().join("run.py")).unwrap();
    let first_env = fs::read_to_string(dir.path().join(".env")).unwrap();

    generate_all(&catalog, &pipeline, dir.path(), false).unwrap();
    let second_script = fs::read_to_string(dir.path().join("run.py")).unwrap();
    let second_env = fs::read_to_string(dir.path().join(".env")).unwrap();

    assert_eq!(first_script, second_script);
    assert_eq!(first_env, second_env);
}

#[test]
fn test_generated_script_imports_match_shipped_runtime() {
    // Every `from utils.X import *` line the compiler can emit must have a
    // matching file in the runtime library we scaffold
    let dir = tempdir().unwrap();
    let catalog = BlockCatalog::with_builtin_blocks();

    // Pipeline touching every category with an import requirement
    let pipeline = Pipeline::from_ids([
        "read_excel",
        "download_file_on_s3",
        "send_message_to_rabbitmq",
        "list_files_on_gdrive",
    ]);

    generate_all(&catalog, &pipeline, dir.path(), true).unwrap();

    let script = fs::read_to_string(dir.path().join("run.py")).unwrap();
    for line in script.lines() {
        if let Some(module) = line
            .strip_prefix("from utils.")
            .and_then(|rest| rest.strip_suffix(" import *"))
        {
            let file = dir.path().join("utils").join(format!("{}.py", module));
            assert!(file.is_file(), "missing runtime module for import: {}", line);
        }
    }
}

#[test]
fn test_unknown_capability_leaves_no_partial_job() {
    let dir = tempdir().unwrap();
    let catalog = BlockCatalog::with_builtin_blocks();
    let pipeline = Pipeline::from_ids(["read_excel", "not_in_catalog"]);

    let job = dir.path().join("job");
    assert!(generate_all(&catalog, &pipeline, &job, true).is_err());
    assert!(!job.exists());
}

#[test]
fn test_validate_reports_all_unknown_ids() {
    let catalog = BlockCatalog::with_builtin_blocks();
    let pipeline = Pipeline::from_ids(["read_excel", "ghost_one", "write_excel", "ghost_two"]);

    assert_eq!(
        pipeline.unknown_capabilities(&catalog),
        vec!["ghost_one", "ghost_two"]
    );
}

#[test]
fn test_extended_catalog_flows_through_generation() {
    let dir = tempdir().unwrap();

    let definition = r#"[
        {
            "id": "drop_duplicates",
            "category": "data_management",
            "label": "Drop Duplicates",
            "description": "Remove duplicated rows.",
            "code": ["    df = df.drop_duplicates()"]
        }
    ]"#;
    let definition_path = dir.path().join("extra.json");
    fs::write(&definition_path, definition).unwrap();

    let mut catalog = BlockCatalog::with_builtin_blocks();
    catalog.extend_from_file(&definition_path).unwrap();

    let pipeline = Pipeline::from_ids(["read_excel", "drop_duplicates", "write_excel"]);
    let job = dir.path().join("job");
    generate_all(&catalog, &pipeline, &job, false).unwrap();

    let script = fs::read_to_string(job.join("run.py")).unwrap();
    assert!(script.contains("    # DROP_DUPLICATES"));
    assert!(script.contains("    df = df.drop_duplicates()"));
}
