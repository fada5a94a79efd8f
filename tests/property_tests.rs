//! Property-Based Tests for pipesmith
//!
//! Uses proptest for testing compiler invariants over arbitrary pipelines:
//! - determinism (same pipeline -> byte-identical artifact)
//! - import/env de-duplication regardless of block order and repetition
//! - code emission count matches selection count
//! - category enum round-trips

use proptest::prelude::*;

use pipesmith::{compile, BlockCatalog, Category, Pipeline};
use strum::IntoEnumIterator;

/// All builtin capability ids, the pool pipelines are drawn from
const BUILTIN_IDS: &[&str] = &[
    "read_excel",
    "write_excel",
    "filter_rows",
    "aggregate_input",
    "map_rows",
    "fill_empty_fields",
    "clear_folder",
    "group_files_in_single_folder",
    "zip_Files",
    "unzip_Files",
    "send_message_to_rabbitmq",
    "download_file_on_s3",
    "list_files_on_gdrive",
    "download_file_on_gdrive",
    "upload_file_on_gdrive",
    "create_timestamped_folder_on_gdrive",
    "move_file_on_gdrive",
];

/// Strategy: an arbitrary pipeline of 0..12 builtin blocks, repeats allowed
fn pipeline_strategy() -> impl Strategy<Value = Pipeline> {
    prop::collection::vec(prop::sample::select(BUILTIN_IDS), 0..12)
        .prop_map(Pipeline::from_ids)
}

proptest! {
    /// Compiling twice yields byte-identical output
    #[test]
    fn compile_is_deterministic(pipeline in pipeline_strategy()) {
        let catalog = BlockCatalog::with_builtin_blocks();
        let first = compile(&catalog, &pipeline).expect("builtin ids resolve");
        let second = compile(&catalog, &pipeline).expect("builtin ids resolve");
        prop_assert_eq!(first, second);
    }

    /// Every category import line appears at most once
    #[test]
    fn imports_are_deduplicated(pipeline in pipeline_strategy()) {
        let catalog = BlockCatalog::with_builtin_blocks();
        let artifact = compile(&catalog, &pipeline).expect("builtin ids resolve");

        for import in [
            "from utils.s3_utils import *",
            "from utils.rabbitmq_utils import *",
            "from utils.gDrive_utils import *",
        ] {
            let count = artifact.script.lines().filter(|l| *l == import).count();
            prop_assert!(count <= 1, "import repeated: {}", import);
        }
    }

    /// No key is declared twice in the manifest
    #[test]
    fn manifest_keys_are_unique(pipeline in pipeline_strategy()) {
        let catalog = BlockCatalog::with_builtin_blocks();
        let artifact = compile(&catalog, &pipeline).expect("builtin ids resolve");

        let keys: Vec<&str> = artifact
            .env_file
            .lines()
            .filter(|l| l.ends_with('='))
            .collect();
        let mut deduped = keys.clone();
        deduped.sort_unstable();
        deduped.dedup();
        prop_assert_eq!(keys.len(), deduped.len());
    }

    /// The manifest always leads with the mandatory job section
    #[test]
    fn manifest_starts_with_job_section(pipeline in pipeline_strategy()) {
        let catalog = BlockCatalog::with_builtin_blocks();
        let artifact = compile(&catalog, &pipeline).expect("builtin ids resolve");
        prop_assert!(artifact.env_file.starts_with("# JOB\nIN=\nOUT=\n"));
    }

    /// Each selection emits its section marker exactly once per occurrence
    #[test]
    fn code_emission_matches_selection_count(pipeline in pipeline_strategy()) {
        let catalog = BlockCatalog::with_builtin_blocks();
        let artifact = compile(&catalog, &pipeline).expect("builtin ids resolve");

        for id in BUILTIN_IDS {
            let expected = pipeline
                .selections
                .iter()
                .filter(|s| s.block == *id)
                .count();
            let marker = format!("    # {}", id.to_uppercase());
            let actual = artifact
                .script
                .lines()
                .filter(|l| *l == marker.as_str())
                .count();
            prop_assert_eq!(expected, actual, "marker count for {}", id);
        }
    }
}

// =============================================================================
// Category Enum Property Tests
// =============================================================================

/// Strategy for generating valid Category variants
fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::iter().collect::<Vec<_>>())
}

proptest! {
    /// Category: to_string -> parse round-trip is identity
    #[test]
    fn category_roundtrip(category in category_strategy()) {
        let s = category.to_string();
        let parsed: Category = s.parse().expect("should parse");
        prop_assert_eq!(category, parsed);
    }

    /// Category: display output is non-empty
    #[test]
    fn category_display_is_valid(category in category_strategy()) {
        prop_assert!(!category.to_string().is_empty());
    }
}
