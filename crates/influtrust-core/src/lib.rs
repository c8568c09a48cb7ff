//! Shared domain types and configuration for influtrust.

pub mod app_config;
pub mod category;
pub mod claims;
pub mod config;
pub mod platform;
pub mod profile;
pub mod record;
pub mod targets;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use category::{load_category_dictionary, Category, CategoryCount, CategoryDictionary};
pub use claims::{
    Claim, ClaimDraft, ClaimStatus, RegistryHandles, RegistryInfluencer, RegistryInfluencerDraft,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use platform::Platform;
pub use profile::{EngagementSample, PlatformProfile, PlatformStatistics, SampleSet};
pub use record::{InfluencerRecord, TrustScore};
pub use targets::{load_targets, TargetConfig, TargetsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read targets file {path}: {source}")]
    TargetsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse targets file: {0}")]
    TargetsFileParse(#[source] serde_yaml::Error),

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[source] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
