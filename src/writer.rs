//! Artifact persistence
//!
//! Writes compiled artifacts to a job folder and scaffolds the folder into a
//! self-contained job: `IN/` / `OUT/` working directories and the runtime
//! support library the generated script imports. The compiler itself performs
//! no filesystem access; everything that touches disk lives here.
//!
//! The script and the manifest always come from one `GeneratedArtifact` and
//! are written together, so a generated program never references environment
//! variables its manifest does not declare.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::catalog::BlockCatalog;
use crate::compiler::{self, GeneratedArtifact, ENV_FILE_NAME, SCRIPT_FILE_NAME};
use crate::pipeline::Pipeline;

/// Runtime support library shipped next to generated jobs
///
/// File names match the import lines the compiler emits; the gDrive casing is
/// part of that contract.
const RUNTIME_FILES: &[(&str, &str)] = &[
    ("__init__.py", include_str!("../assets/runtime/__init__.py")),
    ("runner.py", include_str!("../assets/runtime/runner.py")),
    (
        "logs_management.py",
        include_str!("../assets/runtime/logs_management.py"),
    ),
    (
        "file_management.py",
        include_str!("../assets/runtime/file_management.py"),
    ),
    (
        "data_management.py",
        include_str!("../assets/runtime/data_management.py"),
    ),
    ("s3_utils.py", include_str!("../assets/runtime/s3_utils.py")),
    (
        "rabbitmq_utils.py",
        include_str!("../assets/runtime/rabbitmq_utils.py"),
    ),
    (
        "gDrive_utils.py",
        include_str!("../assets/runtime/gDrive_utils.py"),
    ),
];

/// Write the script/manifest pair into `folder`, creating it if needed
///
/// Returns the path of the written script.
pub fn write_artifact(artifact: &GeneratedArtifact, folder: impl AsRef<Path>) -> Result<PathBuf> {
    let folder = folder.as_ref();
    fs::create_dir_all(folder)
        .with_context(|| format!("Failed to create job folder {:?}", folder))?;

    let script_path = folder.join(SCRIPT_FILE_NAME);
    fs::write(&script_path, &artifact.script)
        .with_context(|| format!("Failed to write {:?}", script_path))?;

    let env_path = folder.join(ENV_FILE_NAME);
    fs::write(&env_path, &artifact.env_file)
        .with_context(|| format!("Failed to write {:?}", env_path))?;

    info!(folder = %folder.display(), "artifact written");
    Ok(script_path)
}

/// Create the `IN/` and `OUT/` companion subfolders (idempotent)
pub fn write_job_folders(folder: impl AsRef<Path>) -> Result<()> {
    let folder = folder.as_ref();
    for name in ["IN", "OUT"] {
        let path = folder.join(name);
        fs::create_dir_all(&path).with_context(|| format!("Failed to create {:?}", path))?;
    }
    Ok(())
}

/// Write the embedded runtime library into `folder/utils/`
///
/// Overwrites existing files so regeneration refreshes the library.
pub fn write_runtime_library(folder: impl AsRef<Path>) -> Result<()> {
    let utils_dir = folder.as_ref().join("utils");
    fs::create_dir_all(&utils_dir)
        .with_context(|| format!("Failed to create {:?}", utils_dir))?;

    for (name, content) in RUNTIME_FILES {
        let path = utils_dir.join(name);
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
    }

    info!(folder = %utils_dir.display(), "runtime library written");
    Ok(())
}

/// One-shot generation entry point
///
/// Compiles the pipeline and writes the artifact; with `local_files` set the
/// job folder is also scaffolded with `IN/`, `OUT/` and the runtime library.
/// Returns the path of the generated script.
pub fn generate_all(
    catalog: &BlockCatalog,
    pipeline: &Pipeline,
    folder: impl AsRef<Path>,
    local_files: bool,
) -> Result<PathBuf> {
    let artifact = compiler::compile(catalog, pipeline)?;
    let script_path = write_artifact(&artifact, &folder)?;

    if local_files {
        write_job_folders(&folder)?;
        write_runtime_library(&folder)?;
    }

    Ok(script_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_artifact() -> GeneratedArtifact {
        let catalog = BlockCatalog::with_builtin_blocks();
        let pipeline = Pipeline::from_ids(["read_excel", "write_excel"]);
        compiler::compile(&catalog, &pipeline).unwrap()
    }

    #[test]
    fn test_write_artifact_creates_both_files() {
        let dir = tempdir().unwrap();
        let job = dir.path().join("job");

        let artifact = sample_artifact();
        let script_path = write_artifact(&artifact, &job).unwrap();

        assert_eq!(script_path, job.join("run.py"));
        assert_eq!(fs::read_to_string(job.join("run.py")).unwrap(), artifact.script);
        assert_eq!(
            fs::read_to_string(job.join(".env")).unwrap(),
            artifact.env_file
        );
    }

    #[test]
    fn test_write_job_folders_idempotent() {
        let dir = tempdir().unwrap();

        write_job_folders(dir.path()).unwrap();
        write_job_folders(dir.path()).unwrap();

        assert!(dir.path().join("IN").is_dir());
        assert!(dir.path().join("OUT").is_dir());
    }

    #[test]
    fn test_write_runtime_library() {
        let dir = tempdir().unwrap();

        write_runtime_library(dir.path()).unwrap();

        let utils = dir.path().join("utils");
        for name in [
            "__init__.py",
            "runner.py",
            "logs_management.py",
            "file_management.py",
            "data_management.py",
            "s3_utils.py",
            "rabbitmq_utils.py",
            "gDrive_utils.py",
        ] {
            assert!(utils.join(name).is_file(), "missing runtime file {}", name);
        }

        // The runner module must define the entry point wrapper the generated
        // footer calls
        let runner = fs::read_to_string(utils.join("runner.py")).unwrap();
        assert!(runner.contains("def run_main("));
    }

    #[test]
    fn test_generate_all_without_local_files() {
        let dir = tempdir().unwrap();
        let catalog = BlockCatalog::with_builtin_blocks();
        let pipeline = Pipeline::from_ids(["clear_folder"]);

        generate_all(&catalog, &pipeline, dir.path(), false).unwrap();

        assert!(dir.path().join("run.py").is_file());
        assert!(dir.path().join(".env").is_file());
        assert!(!dir.path().join("IN").exists());
        assert!(!dir.path().join("utils").exists());
    }

    #[test]
    fn test_generate_all_with_local_files() {
        let dir = tempdir().unwrap();
        let catalog = BlockCatalog::with_builtin_blocks();
        let pipeline = Pipeline::from_ids(["clear_folder"]);

        generate_all(&catalog, &pipeline, dir.path(), true).unwrap();

        assert!(dir.path().join("IN").is_dir());
        assert!(dir.path().join("OUT").is_dir());
        assert!(dir.path().join("utils").join("runner.py").is_file());
    }

    #[test]
    fn test_generate_all_unknown_capability_writes_nothing() {
        let dir = tempdir().unwrap();
        let catalog = BlockCatalog::with_builtin_blocks();
        let pipeline = Pipeline::from_ids(["read_excel", "bogus_block"]);

        let result = generate_all(&catalog, &pipeline, dir.path().join("job"), true);

        assert!(result.is_err());
        assert!(!dir.path().join("job").exists());
    }
}
