//! Enhancer configuration.
//!
//! Every field has a default, so an empty JSON object (or a JS options
//! object with only a few keys) is a valid configuration.

use crate::error::EnhanceError;
use serde::{Deserialize, Serialize};

/// Lookahead added to the scroll position before picking the current section.
pub const DEFAULT_SCROLL_OFFSET: f64 = 100.0;
/// Widest viewport (px) that still gets the slide-out navigation.
pub const DEFAULT_MOBILE_BREAKPOINT: u32 = 768;
/// How far (px) the closed navigation drawer is pushed off-screen.
pub const DEFAULT_DRAWER_OFFSET: u32 = 280;
/// How long (ms) the confirmation label stays on a copy button.
pub const DEFAULT_COPY_RESET_MS: u32 = 2000;

pub const DEFAULT_TOGGLE_LABEL: &str = "☰ Table of Contents";
pub const DEFAULT_COPY_LABEL: &str = "📋 Copy";
pub const DEFAULT_COPIED_LABEL: &str = "✅ Copied!";
pub const DEFAULT_FAILED_LABEL: &str = "⚠ Copy failed";

/// What a copy button does when the clipboard write fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyFailurePolicy {
    /// Leave the label untouched; the failure is only logged at debug level.
    #[default]
    Silent,
    /// Show the failure label, reverting after the usual delay.
    Label,
}

/// Per-component switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Components {
    pub smooth_scroll: bool,
    pub section_highlight: bool,
    pub mobile_nav: bool,
    pub code_copy: bool,
}

impl Default for Components {
    fn default() -> Self {
        Self {
            smooth_scroll: true,
            section_highlight: true,
            mobile_nav: true,
            code_copy: true,
        }
    }
}

/// Configuration for [`PageEnhancer`](crate::PageEnhancer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EnhancerConfig {
    pub scroll_offset: f64,
    pub mobile_breakpoint: u32,
    pub drawer_offset: u32,
    pub toggle_label: String,
    pub copy_label: String,
    pub copied_label: String,
    pub copy_reset_ms: u32,
    pub copy_failure: CopyFailurePolicy,
    pub failed_label: String,
    pub components: Components,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            scroll_offset: DEFAULT_SCROLL_OFFSET,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            drawer_offset: DEFAULT_DRAWER_OFFSET,
            toggle_label: DEFAULT_TOGGLE_LABEL.to_string(),
            copy_label: DEFAULT_COPY_LABEL.to_string(),
            copied_label: DEFAULT_COPIED_LABEL.to_string(),
            copy_reset_ms: DEFAULT_COPY_RESET_MS,
            copy_failure: CopyFailurePolicy::default(),
            failed_label: DEFAULT_FAILED_LABEL.to_string(),
            components: Components::default(),
        }
    }
}

impl EnhancerConfig {
    /// Parse and validate a JSON configuration object.
    pub fn from_json(source: &str) -> Result<Self, EnhanceError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EnhanceError> {
        if !self.scroll_offset.is_finite() {
            return Err(EnhanceError::Config(format!(
                "scrollOffset must be a finite number, got {}",
                self.scroll_offset
            )));
        }
        if self.mobile_breakpoint == 0 {
            return Err(EnhanceError::Config(
                "mobileBreakpoint must be greater than zero".to_string(),
            ));
        }
        for (key, label) in [
            ("toggleLabel", &self.toggle_label),
            ("copyLabel", &self.copy_label),
            ("copiedLabel", &self.copied_label),
            ("failedLabel", &self.failed_label),
        ] {
            if label.trim().is_empty() {
                return Err(EnhanceError::Config(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = EnhancerConfig::from_json("{}").unwrap();
        assert_eq!(config, EnhancerConfig::default());
        assert_eq!(config.scroll_offset, 100.0);
        assert_eq!(config.copy_reset_ms, 2000);
        assert_eq!(config.mobile_breakpoint, 768);
    }

    #[test]
    fn test_partial_override() {
        let config = EnhancerConfig::from_json(
            r#"{ "scrollOffset": 60, "copyFailure": "label", "components": { "mobileNav": false } }"#,
        )
        .unwrap();
        assert_eq!(config.scroll_offset, 60.0);
        assert_eq!(config.copy_failure, CopyFailurePolicy::Label);
        assert!(!config.components.mobile_nav);
        assert!(config.components.code_copy);
        assert_eq!(config.copy_label, DEFAULT_COPY_LABEL);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = EnhancerConfig::from_json(r#"{ "scrollOfset": 60 }"#).unwrap_err();
        assert!(matches!(err, EnhanceError::Config(_)));
        assert!(err.to_string().contains("scrollOfset"));
    }

    #[test]
    fn test_validation_errors() {
        let err = EnhancerConfig::from_json(r#"{ "mobileBreakpoint": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("mobileBreakpoint"));

        let err = EnhancerConfig::from_json(r#"{ "copiedLabel": "  " }"#).unwrap_err();
        assert!(err.to_string().contains("copiedLabel"));

        let config = EnhancerConfig {
            scroll_offset: f64::NAN,
            ..EnhancerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
