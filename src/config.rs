//! Editor options
//!
//! Options arrive from the host as JSON with camelCase keys. Every field has a
//! default, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::license::signature::{Signer, DEFAULT_SIGNING_SECRET};
use crate::theme::{Theme, DEFAULT_THEME};

/// Component list entry enabling every descriptor
pub const ALL_COMPONENTS: &str = "all";

fn default_editor_theme() -> String {
    DEFAULT_THEME.into()
}

fn default_locale() -> String {
    "id".into()
}

fn default_components() -> Vec<String> {
    vec![ALL_COMPONENTS.into()]
}

fn default_signing_secret() -> String {
    DEFAULT_SIGNING_SECRET.into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    #[serde(default = "default_editor_theme")]
    pub editor_theme: String,
    /// Falls back to the editor theme name when absent
    #[serde(default)]
    pub content_theme: Option<Theme>,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Descriptor keys `add_block` accepts, or `["all"]`
    #[serde(default = "default_components")]
    pub components: Vec<String>,
    #[serde(default)]
    pub license_key: Option<String>,
    /// Where the host validates license keys
    #[serde(default)]
    pub api_endpoint: Option<String>,
    #[serde(default = "default_signing_secret")]
    pub signing_secret: String,
    /// JSON or markup imported when the editor is created
    #[serde(default)]
    pub initial_content: Option<String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            editor_theme: default_editor_theme(),
            content_theme: None,
            locale: default_locale(),
            components: default_components(),
            license_key: None,
            api_endpoint: None,
            signing_secret: default_signing_secret(),
            initial_content: None,
        }
    }
}

impl EditorOptions {
    /// Parse options from the host's JSON
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(input)?;
        options.validate()?;
        Ok(options)
    }

    pub fn signer(&self) -> Signer {
        Signer::new(self.signing_secret.clone())
    }

    /// Effective content theme
    pub fn content_theme(&self) -> Theme {
        self.content_theme
            .clone()
            .unwrap_or_else(|| Theme::named(self.editor_theme.clone()))
    }

    /// Whether `key` is enabled by the component list
    pub fn allows(&self, key: &str) -> bool {
        self.components
            .iter()
            .any(|c| c == ALL_COMPONENTS || c == key)
    }

    pub fn with_initial_content(mut self, content: impl Into<String>) -> Self {
        self.initial_content = Some(content.into());
        self
    }

    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.signing_secret.is_empty() {
            return Err(ConfigError::Invalid("signingSecret cannot be empty".into()));
        }
        if self.components.is_empty() {
            return Err(ConfigError::Invalid("components cannot be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid options: {0}")]
    Invalid(String),
}
