//! Type-safe block categories and their dependency profiles
//!
//! A category groups capabilities that share one external-dependency profile:
//! the import line the generated script needs and the environment variables
//! the generated job reads. The category -> profile relationship is a static
//! data table, so adding a category is a data addition rather than new
//! control flow in the compiler.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Block category, used for catalog grouping and for import/env resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum Category {
    #[strum(serialize = "IN / OUT")]
    #[serde(rename = "in_out")]
    InOut,
    #[strum(serialize = "Data Management")]
    #[serde(rename = "data_management")]
    DataManagement,
    #[strum(serialize = "File Management")]
    #[serde(rename = "file_management")]
    FileManagement,
    #[strum(serialize = "RabbitMQ")]
    #[serde(rename = "rabbitmq")]
    RabbitMq,
    #[strum(serialize = "S3")]
    #[serde(rename = "s3")]
    S3,
    #[strum(serialize = "Google Drive")]
    #[serde(rename = "gdrive")]
    GoogleDrive,
}

/// Environment variable section a category contributes to the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvSection {
    /// Comment label introducing the section (e.g. "S3")
    pub label: &'static str,
    /// Variable names declared by the section, in manifest order
    pub keys: &'static [&'static str],
}

/// Dependency profile of one category
///
/// `import` is the single import line the generated script needs when any
/// block of the category is present; `env` is the manifest section the
/// generated job reads. Either may be absent for bare categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProfile {
    pub category: Category,
    pub import: Option<&'static str>,
    pub env: Option<EnvSection>,
}

/// The category dependency table
///
/// Row order here is catalog-presentation order; the compiler never uses this
/// order, it resolves imports and env sections in pipeline first-appearance
/// order.
pub const CATEGORY_PROFILES: &[CategoryProfile] = &[
    CategoryProfile {
        category: Category::InOut,
        import: None,
        env: None,
    },
    CategoryProfile {
        category: Category::DataManagement,
        import: None,
        env: None,
    },
    CategoryProfile {
        category: Category::FileManagement,
        import: None,
        env: None,
    },
    CategoryProfile {
        category: Category::RabbitMq,
        import: Some("from utils.rabbitmq_utils import *"),
        env: Some(EnvSection {
            label: "RabbitMQ",
            keys: &[
                "RABBITMQ_HOST",
                "RABBITMQ_PORT",
                "RABBITMQ_USER",
                "RABBITMQ_PASS",
                "RABBITMQ_EXCHANGE",
            ],
        }),
    },
    CategoryProfile {
        category: Category::S3,
        import: Some("from utils.s3_utils import *"),
        env: Some(EnvSection {
            label: "S3",
            keys: &["AWS_ACCESS_KEY", "AWS_SECRET_KEY", "AWS_BUCKET"],
        }),
    },
    CategoryProfile {
        category: Category::GoogleDrive,
        import: Some("from utils.gDrive_utils import *"),
        env: Some(EnvSection {
            label: "Google Drive",
            keys: &["GDRIVE_CREDENTIALS_FILE", "GDRIVE_FOLDER_ID"],
        }),
    },
];

impl Category {
    /// Look up this category's dependency profile in the table
    pub fn profile(&self) -> &'static CategoryProfile {
        CATEGORY_PROFILES
            .iter()
            .find(|p| p.category == *self)
            .expect("every category has a profile row")
    }

    /// Import line required by this category, if any
    pub fn import_line(&self) -> Option<&'static str> {
        self.profile().import
    }

    /// Environment section declared by this category, if any
    pub fn env_section(&self) -> Option<EnvSection> {
        self.profile().env
    }
}
