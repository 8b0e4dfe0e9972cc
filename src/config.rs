//! Per-site configuration record.
//!
//! Both documentation sites run the same three behaviors; what differs between
//! them is captured here. A page may embed a JSON object with any subset of
//! these keys (camelCase) and the rest fall back to [`InteractConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::{InteractError, Result};

/// Height of the sticky header that covers the top of each section.
pub const DEFAULT_HEADER_OFFSET_PX: f64 = 80.0;

/// How long the "Copied!"/"Failed" label stays before reverting.
pub const DEFAULT_REVERT_TIMEOUT_MS: u32 = 1500;

/// Upper bound accepted for `revert_timeout_ms`.
pub const MAX_REVERT_TIMEOUT_MS: u32 = 10_000;

/// Storage key for the persisted theme preference.
pub const DEFAULT_STORAGE_KEY: &str = "docsite-theme";

/// What the copy button shows when the fallback copy command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Report the failure as if the copy had worked.
    Lenient,
    /// Show the distinct failure label, then revert.
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct InteractConfig {
    pub header_offset_px: f64,
    pub revert_timeout_ms: u32,
    pub strict_failure_reporting: bool,
    pub theme_enabled: bool,
    pub storage_key: String,
    /// Attribute set on the document element, e.g. `data-theme="light"`.
    pub theme_attribute: String,
    /// Class toggled on the active navigation link.
    pub active_class: String,
    pub section_selector: String,
    pub nav_link_selector: String,
    pub code_block_selector: String,
    pub theme_toggle_selector: String,
    pub copy_label: String,
    pub copied_label: String,
    pub failed_label: String,
    pub light_label: String,
    pub dark_label: String,
}

impl Default for InteractConfig {
    fn default() -> Self {
        Self {
            header_offset_px: DEFAULT_HEADER_OFFSET_PX,
            revert_timeout_ms: DEFAULT_REVERT_TIMEOUT_MS,
            strict_failure_reporting: false,
            theme_enabled: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            theme_attribute: "data-theme".to_string(),
            active_class: "active".to_string(),
            section_selector: "main section[id]".to_string(),
            nav_link_selector: "nav a[href^='#']".to_string(),
            code_block_selector: "pre".to_string(),
            theme_toggle_selector: "#theme-toggle".to_string(),
            copy_label: "Copy".to_string(),
            copied_label: "Copied!".to_string(),
            failed_label: "Failed".to_string(),
            light_label: "Light".to_string(),
            dark_label: "Dark".to_string(),
        }
    }
}

impl InteractConfig {
    /// The integration without a theme toggle, which always reports copies as
    /// successful.
    pub fn lenient_site() -> Self {
        Self {
            strict_failure_reporting: false,
            theme_enabled: false,
            ..Self::default()
        }
    }

    /// The integration with a theme toggle and a visible failure label.
    pub fn themed_site() -> Self {
        Self {
            strict_failure_reporting: true,
            theme_enabled: true,
            ..Self::default()
        }
    }

    /// Parse a page-embedded JSON config block and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| InteractError::config(format!("config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.header_offset_px.is_finite() || self.header_offset_px < 0.0 {
            return Err(InteractError::config(format!(
                "headerOffsetPx must be a finite, non-negative number (got {})",
                self.header_offset_px
            )));
        }
        if self.revert_timeout_ms == 0 || self.revert_timeout_ms > MAX_REVERT_TIMEOUT_MS {
            return Err(InteractError::config(format!(
                "revertTimeoutMs must be within 1..={MAX_REVERT_TIMEOUT_MS} (got {})",
                self.revert_timeout_ms
            )));
        }

        let required = [
            ("storageKey", &self.storage_key),
            ("themeAttribute", &self.theme_attribute),
            ("activeClass", &self.active_class),
            ("sectionSelector", &self.section_selector),
            ("navLinkSelector", &self.nav_link_selector),
            ("codeBlockSelector", &self.code_block_selector),
            ("themeToggleSelector", &self.theme_toggle_selector),
            ("copyLabel", &self.copy_label),
            ("copiedLabel", &self.copied_label),
            ("failedLabel", &self.failed_label),
            ("lightLabel", &self.light_label),
            ("darkLabel", &self.dark_label),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(InteractError::config(format!("{key} must not be empty")));
            }
        }
        // A class token cannot contain whitespace; classList rejects it.
        if self.active_class.chars().any(char::is_whitespace) {
            return Err(InteractError::config(format!(
                "activeClass must be a single class token (got {:?})",
                self.active_class
            )));
        }
        Ok(())
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.strict_failure_reporting {
            FailurePolicy::Strict
        } else {
            FailurePolicy::Lenient
        }
    }
}
