use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::ConfigError;

/// One tracked influencer and the platform IDs to fetch for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    /// Instagram business/creator account ID.
    pub instagram: Option<String>,
    /// `YouTube` channel ID.
    pub youtube: Option<String>,
    /// `LinkedIn` organization ID.
    pub linkedin: Option<String>,
}

impl TargetConfig {
    #[must_use]
    pub fn handle(&self, platform: Platform) -> Option<&str> {
        let handle = match platform {
            Platform::Instagram => self.instagram.as_deref(),
            Platform::YouTube => self.youtube.as_deref(),
            Platform::LinkedIn => self.linkedin.as_deref(),
        };
        handle.map(str::trim).filter(|h| !h.is_empty())
    }

    /// Configured `(platform, id)` pairs in platform order.
    pub fn handles(&self) -> impl Iterator<Item = (Platform, &str)> {
        Platform::ALL
            .into_iter()
            .filter_map(move |p| self.handle(p).map(|h| (p, h)))
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetsFile {
    pub influencers: Vec<TargetConfig>,
}

impl TargetsFile {
    /// Parse and validate targets from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the YAML is malformed or fails validation.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: TargetsFile =
            serde_yaml::from_str(content).map_err(ConfigError::TargetsFileParse)?;
        validate_targets(&file)?;
        Ok(file)
    }
}

/// Load and validate the tracked-influencer list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_targets(path: &Path) -> Result<TargetsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TargetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    TargetsFile::from_yaml_str(&content)
}

fn validate_targets(file: &TargetsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for target in &file.influencers {
        if target.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "influencer name must be non-empty".to_string(),
            ));
        }

        if target.handles().next().is_none() {
            return Err(ConfigError::Validation(format!(
                "influencer '{}' has no instagram, youtube, or linkedin id",
                target.name
            )));
        }

        if !seen_names.insert(target.name.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate influencer name: '{}'",
                target.name
            )));
        }
    }

    Ok(())
}
