//! Compile-time configuration loaded from `mdforge.toml`.
//!
//! Every section has defaults, so a missing config file is fine. Unknown
//! keys are tolerated (forward compatibility with newer configs).

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

// =============================================================================
// Sections
// =============================================================================

/// CDN image rewriting options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CdnConfig {
    /// Maximum width transform applied to images (`w_<max_width>`).
    pub max_width: u32,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self { max_width: 1600 }
    }
}

/// Affiliate tag injection for known storefront/lesson domains.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AffiliateConfig {
    /// `tag` query parameter for amazon.com links.
    pub amazon_tag: String,
    /// `af` query parameter for egghead.io links and lesson embeds.
    pub egghead_code: String,
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            amazon_tag: "kentcdodds-20".to_string(),
            egghead_code: "5236ad".to_string(),
        }
    }
}

/// Serialization gate options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Per-compilation time budget in seconds.
    pub timeout_secs: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl QueueConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Reading time estimation options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadTimeConfig {
    pub words_per_minute: u32,
}

impl Default for ReadTimeConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
        }
    }
}

/// Syntax highlighting options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme used to pick token classes.
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

// =============================================================================
// ForgeConfig
// =============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub cdn: CdnConfig,
    pub affiliate: AffiliateConfig,
    pub queue: QueueConfig,
    pub read_time: ReadTimeConfig,
    pub highlight: HighlightConfig,
}

impl ForgeConfig {
    /// Load config from a TOML file, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config `{}`", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config `{}`", path.display()))?;
        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
