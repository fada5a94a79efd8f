//! Block Catalog
//!
//! This module defines the read-only registry of code blocks a pipeline can
//! select from. Each block declares:
//! - a stable capability id (the lookup key)
//! - a category (drives import and environment-variable resolution)
//! - a display label and description for the presentation layer
//! - an opaque code template, stored and served as literal text
//!
//! # Design Principles
//!
//! 1. **Dumb registry**: templates are never parsed, validated, or executed
//! 2. **Fail fast**: resolving an unknown capability id is an error, not a
//!    silent skip
//! 3. **Immutable after load**: the catalog is built once at startup and only
//!    read afterwards
//!
//! # Definition file format
//!
//! External definition files are JSON arrays of block definitions:
//! ```json
//! [
//!   {
//!     "id": "read_excel",
//!     "category": "in_out",
//!     "label": "Read Excel",
//!     "description": "Search and read the Excel file in the IN folder.",
//!     "code": ["    df = pd.read_excel(get_excel_file(IN), header=0)"]
//!   }
//! ]
//! ```

// Library API - these types are exported for external use but not fully
// consumed by the binary
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::category::Category;

/// Errors that can occur during catalog operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Capability id not present in the catalog
    #[error("Unknown capability: {id}")]
    UnknownCapability { id: String },

    /// Invalid definition file format
    #[error("Invalid catalog format: {reason}")]
    InvalidFormat { reason: String },

    /// Two definitions share one capability id
    #[error("Duplicate capability id: {id}")]
    DuplicateCapability { id: String },

    /// IO error reading a definition file
    #[error("Failed to read catalog: {reason}")]
    IoError { reason: String },
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::IoError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidFormat {
            reason: err.to_string(),
        }
    }
}

/// One reusable unit of job logic
///
/// Immutable once constructed; the code template is opaque text emitted
/// verbatim by the compiler (modulo per-selection placeholder overrides).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockDefinition {
    /// Stable capability id (unique within a catalog)
    pub id: String,

    /// Category the block belongs to
    pub category: Category,

    /// Short display label
    pub label: String,

    /// Human-readable description for the presentation layer
    pub description: String,

    /// Literal template lines, emitted in order
    pub code: Vec<String>,
}

impl BlockDefinition {
    /// Create a new block definition
    pub fn new(
        id: impl Into<String>,
        category: Category,
        label: impl Into<String>,
        description: impl Into<String>,
        code: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            category,
            label: label.into(),
            description: description.into(),
            code: code.iter().map(|line| line.to_string()).collect(),
        }
    }
}

/// Registry of block definitions, keyed by capability id
#[derive(Debug, Default)]
pub struct BlockCatalog {
    /// Definitions in registration order
    blocks: Vec<BlockDefinition>,
    /// Capability id -> index into `blocks`
    index: HashMap<String, usize>,
}

impl BlockCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block definition
    ///
    /// Fails with `DuplicateCapability` when the id is already registered;
    /// the catalog is never silently overwritten.
    pub fn register(&mut self, block: BlockDefinition) -> Result<(), CatalogError> {
        if self.index.contains_key(&block.id) {
            return Err(CatalogError::DuplicateCapability {
                id: block.id.clone(),
            });
        }
        self.index.insert(block.id.clone(), self.blocks.len());
        self.blocks.push(block);
        Ok(())
    }

    /// Resolve a capability id to its definition
    pub fn resolve(&self, id: &str) -> Result<&BlockDefinition, CatalogError> {
        self.index
            .get(id)
            .map(|&i| &self.blocks[i])
            .ok_or_else(|| CatalogError::UnknownCapability { id: id.to_string() })
    }

    /// Whether a capability id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All definitions in registration order
    pub fn all(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.blocks.iter()
    }

    /// Ordered category listing for the presentation layer
    ///
    /// Categories appear in declaration order; blocks within a category keep
    /// registration order. Categories with no blocks are omitted.
    pub fn categories(&self) -> Vec<(Category, Vec<&BlockDefinition>)> {
        Category::iter()
            .filter_map(|category| {
                let blocks: Vec<&BlockDefinition> = self
                    .blocks
                    .iter()
                    .filter(|b| b.category == category)
                    .collect();
                if blocks.is_empty() {
                    None
                } else {
                    Some((category, blocks))
                }
            })
            .collect()
    }

    /// Load additional definitions from a JSON string
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let blocks: Vec<BlockDefinition> = serde_json::from_str(json)?;
        let count = blocks.len();
        for block in blocks {
            self.register(block)?;
        }
        Ok(count)
    }

    /// Load additional definitions from a JSON file
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        self.extend_from_json(&content)
    }

    /// Load all definition files (`*.json`) from a directory
    pub fn load_from_directory(&mut self, dir: impl AsRef<Path>) -> Result<usize, CatalogError> {
        let dir = dir.as_ref();
        let mut count = 0;

        if !dir.exists() {
            return Ok(0);
        }

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map(|e| e == "json").unwrap_or(false) {
                count += self.extend_from_file(&path)?;
            }
        }

        Ok(count)
    }

    /// Create a catalog with the builtin block definitions
    pub fn with_builtin_blocks() -> Self {
        let mut catalog = Self::new();

        for block in builtin_blocks() {
            catalog
                .register(block)
                .expect("builtin capability ids are unique");
        }

        catalog
    }
}

/// The builtin block table
///
/// Templates carry their own four-space indentation so the compiler can emit
/// them verbatim inside the generated entry point.
fn builtin_blocks() -> Vec<BlockDefinition> {
    vec![
        // ---------------------------------------------------------------
        // IN / OUT
        // ---------------------------------------------------------------
        BlockDefinition::new(
            "read_excel",
            Category::InOut,
            "Read Excel",
            "Search and read the Excel file in the IN folder. The folder will be editable.",
            &[
                "    # The parameter IN can be modified if the excel file is elsewhere",
                "    # The parameter header can also be changed to fit the excel file (0 is the first row, 1 is the second row, etc.)",
                "    # The parameter dtype can be added to adapt the column type. To force a column to be a string use the following line:",
                "    # df = pd.read_excel(get_excel_file(IN), header=0, dtype={\"COLUMN_NAME\": str}).fillna(\"\")",
                "    df = pd.read_excel(get_excel_file(IN), header=0).fillna(\"\")",
            ],
        ),
        BlockDefinition::new(
            "write_excel",
            Category::InOut,
            "Export Excel",
            "Write the Excel file in the OUT folder. The folder and file name will be editable.",
            &[
                "    # The parameter OUT can be modified if the excel file is elsewhere",
                "    # The parameter file_name can be modified to change the name of the file",
                "    file_name = 'file.xlsx'",
                "    outputFile = os.path.join(OUT, file_name)",
                "    df.to_excel(outputFile, index=False)",
            ],
        ),
        // ---------------------------------------------------------------
        // Data Management
        // ---------------------------------------------------------------
        BlockDefinition::new(
            "filter_rows",
            Category::DataManagement,
            "Filter",
            "Apply filter to the rows. A filter column will be needed and a function to apply will also have to be set. <br>Example:<br> FILTERS = {'COLUMN_NAME': lambda value: value > 500000}",
            &[
                "    # Need to define the filter columns and the function to apply. Here, the row will filter the column 'COLUMN_NAME' where the value is different from empty string",
                "    # To filter on an empty date, you can use {\"DATE_COLOMN\": lambda value: pd.notna(value)}",
                "    FILTERS = {\"COLUMN_NAME\": lambda value: value != \"\"}",
                "    df = filter_rows(df, FILTERS)",
            ],
        ),
        BlockDefinition::new(
            "aggregate_input",
            Category::DataManagement,
            "Aggregate",
            "Apply aggregation to the rows. An aggregation column will be needed and a column to apply the sum will also have to be set. <br>Example:<br> GROUP_COLUMNS = ['COLUMN_1', 'COLUMN_2']<br>AMOUNT_COLUMN = 'COLUMN_3'",
            &[
                "    # Need to define the group columns and the column to apply the sum. Here, the row will group by the columns 'COLUMN_1' and 'COLUMN_2' and apply the sum on 'COLUMN_3'",
                "    GROUP_COLUMNS = [\"COLUMN_1\", \"COLUMN_2\"]",
                "    AMOUNT_COLUMN = \"COLUMN_3\"",
                "    df = aggregate_input(df, GROUP_COLUMNS, AMOUNT_COLUMN)",
            ],
        ),
        BlockDefinition::new(
            "map_rows",
            Category::DataManagement,
            "Mapping",
            "Apply a mapping to the rows using a predefined FIELD_MAPPING. Each field is transformed individually based on the input row.",
            &[
                "    # Define a dictionary that maps output field names to a transformation function",
                "    # Each function receives the current row and its index, and returns the mapped value",
                "    # The transformation function can be a lambda function or a regular function used in the lambda function",
                "    # Example:",
                "    # def build_description(row):",
                "    #     return f'{row['COLUMN_1']} - {row['COLUMN_2']}'",
                "    # FIELD_MAPPING:",
                "    # {",
                "    #     \"ID\": lambda row, row_index: row_index + 1,  # Assign an incremental ID starting from 1",
                "    #     \"Description\": lambda row, row_index: build_description(row),  # Copy and cast description field",
                "    #     \"Total_Amount\": lambda row, row_index: row[\"PRICE\"] * row[\"QUANTITY\"],  # Calculate total amount from price and quantity",
                "    #     \"Trans_Date\": lambda row, row_index: pd.to_datetime(row[\"DATE\"]).strftime(\"%Y-%m-%d\"),  # Format date field to YYYY-MM-DD",
                "    # }",
                "",
                "    # Actual FIELD_MAPPING used here",
                "    FIELD_MAPPING = {",
                "        \"OutputFieldName\": lambda row, row_index: str(row[\"InputFieldName\"]),  # Map InputFieldName to OutputFieldName after casting to string",
                "    }",
                "",
                "    # Apply the mapping to the dataframe",
                "    df = map_fields(df, FIELD_MAPPING)",
            ],
        ),
        BlockDefinition::new(
            "fill_empty_fields",
            Category::DataManagement,
            "Fill Empty Fields",
            "Fill empty fields in the DataFrame. The column name will be editable.",
            &[
                "    # Need to define the column name to fill empty fields",
                "    column_name = \"\"",
                "    df = fill_empty_fields(df, column_name)",
            ],
        ),
        // ---------------------------------------------------------------
        // File Management
        // ---------------------------------------------------------------
        BlockDefinition::new(
            "clear_folder",
            Category::FileManagement,
            "Clear Folder",
            "Clear the folder. The folder will be editable.",
            &[
                "    # The parameter OUT can be modified to clear another folder",
                "    clear_folder(OUT)",
            ],
        ),
        BlockDefinition::new(
            "group_files_in_single_folder",
            Category::FileManagement,
            "Group Files In Single Folder",
            "Copy all files in a single folder. The folders from and where will be editable.",
            &[
                "    # The parameters IN and OUT can be modified to group files from another folder or to another folder",
                "    group_files_in_single_folder(IN, OUT)",
            ],
        ),
        BlockDefinition::new(
            "zip_Files",
            Category::FileManagement,
            "Zip Folder",
            "Zip all files in a single folder. The folders from and where will be editable.",
            &[
                "    # The parameter folder_path determines the folder to zip",
                "    folder_path = IN",
                "    # The parameter zip_path determines the path to save the zip file",
                "    zip_path = os.path.join(OUT, 'archive.zip')",
                "    zip_folder(folder_path, zip_path)",
            ],
        ),
        BlockDefinition::new(
            "unzip_Files",
            Category::FileManagement,
            "Unzip Folder",
            "Unzip all files in a single folder. The folders from and where will be editable.",
            &[
                "    # The parameter zip_path determines the path to the zip file",
                "    zip_path = os.path.join(IN, 'archive.zip')",
                "    # The parameter folder_path determines the folder to unzip",
                "    folder_path = OUT",
                "    unzip_folder(zip_path, folder_path)",
            ],
        ),
        // ---------------------------------------------------------------
        // RabbitMQ
        // ---------------------------------------------------------------
        BlockDefinition::new(
            "send_message_to_rabbitmq",
            Category::RabbitMq,
            "Send Message",
            "Define a message and send a payload to RabbitMQ.",
            &[
                "    rabbitmq_payload = {}",
                "    send_message_to_rabbitmq(rabbitmq_payload)",
            ],
        ),
        // ---------------------------------------------------------------
        // S3
        // ---------------------------------------------------------------
        BlockDefinition::new(
            "download_file_on_s3",
            Category::S3,
            "Download File",
            "Download a file from S3. The variables will be loaded from the .env file.",
            &[
                "    # The parameter IN can be modified to download another in another folder.",
                "    # The parameter s3_prefix need to be set to determine where are the files in the S3 storage",
                "    s3_prefix = \"\"",
                "    download_s3_folder(IN, s3_prefix)",
            ],
        ),
        // ---------------------------------------------------------------
        // Google Drive
        // ---------------------------------------------------------------
        BlockDefinition::new(
            "list_files_on_gdrive",
            Category::GoogleDrive,
            "List Files",
            "List all files in a Google Drive folder. The variables will be loaded from the .env file.",
            &[
                "    # The parameter gdrive_folder_id can be set in the .env file to determine where are the files in the Google Drive storage",
                "    gdrive_folder_id = os.getenv(\"GDRIVE_FOLDER_ID\")",
                "    list_files(gdrive_folder_id)",
            ],
        ),
        BlockDefinition::new(
            "download_file_on_gdrive",
            Category::GoogleDrive,
            "Download File",
            "Download a file from Google Drive. The variables will be loaded from the .env file.",
            &[
                "    # The parameter IN can be modified to download another in another folder.",
                "    # The parameter gdrive_folder_id need to be set to determine where are the files in the Google Drive storage",
                "    gdrive_folder_id = \"\"",
                "    download_file(gdrive_folder_id, IN)",
            ],
        ),
        BlockDefinition::new(
            "upload_file_on_gdrive",
            Category::GoogleDrive,
            "Upload File",
            "Upload a file to Google Drive. The variables will be loaded from the .env file.",
            &[
                "    # The parameter OUT can be modified to upload another in another folder.",
                "    # The parameter gdrive_folder_id need to be set to determine where are the files in the Google Drive storage",
                "    gdrive_folder_id = \"\"",
                "    upload_file(gdrive_folder_id, OUT)",
            ],
        ),
        BlockDefinition::new(
            "create_timestamped_folder_on_gdrive",
            Category::GoogleDrive,
            "Create Timestamped Folder",
            "Create a timestamped folder in Google Drive. The variables will be loaded from the .env file.",
            &[
                "    # The parameter OUT can be modified to create another in another folder.",
                "    # The parameter gdrive_folder_id need to be set to determine where are the files in the Google Drive storage",
                "    gdrive_folder_id = \"\"",
                "    create_timestamped_folder(gdrive_folder_id, OUT)",
            ],
        ),
        BlockDefinition::new(
            "move_file_on_gdrive",
            Category::GoogleDrive,
            "Move File",
            "Move a file in Google Drive. The variables will be loaded from the .env file.",
            &[
                "    # The parameter OUT can be modified to move another in another folder.",
                "    # The parameter gdrive_folder_id need to be set to determine where are the files in the Google Drive storage",
                "    gdrive_folder_id = \"\"",
                "    move_file(gdrive_folder_id, OUT)",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Registry Tests
    // =========================================================================

    #[test]
    fn test_register_and_resolve() {
        let mut catalog = BlockCatalog::new();

        let block = BlockDefinition::new(
            "noop",
            Category::FileManagement,
            "No-op",
            "Does nothing",
            &["    pass"],
        );
        catalog.register(block).unwrap();

        assert!(catalog.resolve("noop").is_ok());
        assert!(catalog.contains("noop"));
        assert!(!catalog.contains("missing"));
    }

    #[test]
    fn test_resolve_unknown_capability() {
        let catalog = BlockCatalog::with_builtin_blocks();

        let err = catalog.resolve("definitely_not_a_block").unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownCapability {
                id: "definitely_not_a_block".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut catalog = BlockCatalog::new();
        let block = BlockDefinition::new(
            "noop",
            Category::FileManagement,
            "No-op",
            "Does nothing",
            &["    pass"],
        );
        catalog.register(block.clone()).unwrap();

        let err = catalog.register(block).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCapability { .. }));
    }

    // =========================================================================
    // Builtin Catalog Tests
    // =========================================================================

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = BlockCatalog::with_builtin_blocks();

        assert_eq!(catalog.len(), 17);
        for id in [
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
        ] {
            assert!(catalog.contains(id), "builtin block {} missing", id);
        }
    }

    #[test]
    fn test_builtin_catalog_category_listing() {
        let catalog = BlockCatalog::with_builtin_blocks();
        let listing = catalog.categories();

        let names: Vec<String> = listing.iter().map(|(c, _)| c.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "IN / OUT",
                "Data Management",
                "File Management",
                "RabbitMQ",
                "S3",
                "Google Drive",
            ]
        );

        // Blocks keep registration order within their category
        let (_, in_out) = &listing[0];
        assert_eq!(in_out[0].id, "read_excel");
        assert_eq!(in_out[1].id, "write_excel");
    }

    #[test]
    fn test_builtin_templates_are_indented() {
        let catalog = BlockCatalog::with_builtin_blocks();

        // Templates live inside `def main():`, so every nonempty line must
        // carry the body indentation
        for block in catalog.all() {
            for line in &block.code {
                if !line.is_empty() {
                    assert!(
                        line.starts_with("    "),
                        "block {} has unindented line: {:?}",
                        block.id,
                        line
                    );
                }
            }
        }
    }

    // =========================================================================
    // Definition File Tests
    // =========================================================================

    #[test]
    fn test_extend_from_json() {
        let json = r#"[
            {
                "id": "drop_duplicates",
                "category": "data_management",
                "label": "Drop Duplicates",
                "description": "Remove duplicated rows.",
                "code": ["    df = df.drop_duplicates()"]
            }
        ]"#;

        let mut catalog = BlockCatalog::with_builtin_blocks();
        let count = catalog.extend_from_json(json).unwrap();

        assert_eq!(count, 1);
        let block = catalog.resolve("drop_duplicates").unwrap();
        assert_eq!(block.category, Category::DataManagement);
        assert_eq!(block.code, vec!["    df = df.drop_duplicates()"]);
    }

    #[test]
    fn test_extend_from_json_duplicate_builtin_rejected() {
        let json = r#"[
            {
                "id": "read_excel",
                "category": "in_out",
                "label": "Read Excel Again",
                "description": "Shadowing a builtin is not allowed.",
                "code": ["    pass"]
            }
        ]"#;

        let mut catalog = BlockCatalog::with_builtin_blocks();
        let err = catalog.extend_from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCapability { .. }));
    }

    #[test]
    fn test_extend_from_invalid_json() {
        let mut catalog = BlockCatalog::new();
        let err = catalog.extend_from_json("{ not json ]").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFormat { .. }));
    }

    #[test]
    fn test_load_from_missing_directory() {
        let mut catalog = BlockCatalog::new();
        let count = catalog
            .load_from_directory("/nonexistent/catalog/dir")
            .unwrap();
        assert_eq!(count, 0);
    }
}
