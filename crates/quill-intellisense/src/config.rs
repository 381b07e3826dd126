//! Intellisense settings: delimiter, key bindings, tooltip sizing

use crate::keys::Key;
use quill_core::DEFAULT_DELIMITER;
use serde::{Deserialize, Serialize};

/// Tooltip cap used when nothing is configured.
pub const DEFAULT_TOOLTIP_WIDTH: usize = 48;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid intellisense config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("delimiter {0:?} must not be whitespace or alphanumeric")]
    Delimiter(char),
    #[error("tooltip max_width must be at least 1")]
    TooltipWidth,
    #[error("{name} binding `{key}` would swallow a typed character")]
    Binding { name: &'static str, key: Key },
}

/// The `[intellisense]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntellisenseConfig {
    /// Character that separates key segments and opens autocomplete.
    pub delimiter: char,
    /// Open the popup when the delimiter is typed as a plain character.
    pub auto_trigger: bool,
    pub keys: KeyBindings,
    pub tooltip: TooltipConfig,
}

impl Default for IntellisenseConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            auto_trigger: false,
            keys: KeyBindings::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    /// Inserts the delimiter and opens autocomplete.
    pub trigger: Key,
    /// Shows the definition tooltip for the word before the caret.
    pub definition: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            trigger: Key::Ctrl('_'),
            definition: Key::Function(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TooltipConfig {
    /// Line width cap, in characters.
    pub max_width: usize,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_TOOLTIP_WIDTH,
        }
    }
}

impl IntellisenseConfig {
    /// Parse the body of an `[intellisense]` table.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: IntellisenseConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_whitespace() || self.delimiter.is_alphanumeric() {
            return Err(ConfigError::Delimiter(self.delimiter));
        }
        if self.tooltip.max_width == 0 {
            return Err(ConfigError::TooltipWidth);
        }
        // plain characters are only bindable as the delimiter itself
        for (name, key) in [("trigger", self.keys.trigger), ("definition", self.keys.definition)] {
            if let Key::Char(c) = key {
                if name == "definition" || c != self.delimiter {
                    return Err(ConfigError::Binding { name, key });
                }
            }
        }
        Ok(())
    }
}
