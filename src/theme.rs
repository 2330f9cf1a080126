//! Content themes
//!
//! A content theme is an ordered table of `--ef-*` CSS variables written onto
//! the exported document root. Named themes come from a fixed table; anything
//! else read back from an import is kept as a custom theme.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_THEME: &str = "glassmorphism";

/// Editor chrome themes. Carried through JSON export, not rendered here.
pub const EDITOR_THEMES: &[&str] = &["glassmorphism", "simple-modern", "colorful"];

type Table = &'static [(&'static str, &'static str)];

const GLASSMORPHISM: Table = &[
    ("--ef-bg", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
    ("--ef-card-bg", "rgba(255, 255, 255, 0.1)"),
    ("--ef-card-border", "rgba(255, 255, 255, 0.2)"),
    ("--ef-text-primary", "#f8fafc"),
    ("--ef-text-secondary", "rgba(248, 250, 252, 0.8)"),
    ("--ef-code-bg", "rgba(0, 0, 0, 0.3)"),
    ("--ef-code-text", "#4ade80"),
    ("--ef-tip-bg", "rgba(255, 255, 255, 0.1)"),
    ("--ef-tip-border", "#6366f1"),
    ("--ef-cta-bg", "rgba(255, 255, 255, 0.1)"),
    ("--ef-cta-text", "#f8fafc"),
    ("--ef-cta-btn-primary", "linear-gradient(135deg, #6366f1, #8b5cf6)"),
    ("--ef-cta-btn-secondary", "rgba(255, 255, 255, 0.1)"),
    ("--ef-table-header-bg", "rgba(255, 255, 255, 0.1)"),
];

const SIMPLE_MODERN: Table = &[
    ("--ef-bg", "#f8f9fa"),
    ("--ef-card-bg", "#ffffff"),
    ("--ef-card-border", "#dee2e6"),
    ("--ef-text-primary", "#212529"),
    ("--ef-text-secondary", "#6c757d"),
    ("--ef-code-bg", "#f8f9fa"),
    ("--ef-code-text", "#d63384"),
    ("--ef-tip-bg", "#cfe2ff"),
    ("--ef-tip-border", "#0d6efd"),
    ("--ef-cta-bg", "#e7f3ff"),
    ("--ef-cta-text", "#0a3d80"),
    ("--ef-cta-btn-primary", "#0d6efd"),
    ("--ef-cta-btn-secondary", "#ffffff"),
    ("--ef-table-header-bg", "#e7f1ff"),
];

const COLORFUL: Table = &[
    ("--ef-bg", "linear-gradient(135deg, #fef3c7 0%, #fde68a 50%, #fcd34d 100%)"),
    ("--ef-card-bg", "rgba(255, 255, 255, 0.9)"),
    ("--ef-card-border", "#fbbf24"),
    ("--ef-text-primary", "#78350f"),
    ("--ef-text-secondary", "#92400e"),
    ("--ef-code-bg", "#1e293b"),
    ("--ef-code-text", "#fbbf24"),
    ("--ef-tip-bg", "#dbeafe"),
    ("--ef-tip-border", "#3b82f6"),
    ("--ef-cta-bg", "linear-gradient(135deg, #f59e0b, #d97706)"),
    ("--ef-cta-text", "#ffffff"),
    ("--ef-cta-btn-primary", "linear-gradient(135deg, #dc2626, #b91c1c)"),
    ("--ef-cta-btn-secondary", "#dba213ff"),
    ("--ef-table-header-bg", "linear-gradient(135deg, #fbbf24, #f59e0b)"),
];

const CLEAN_WHITE: Table = &[
    ("--ef-bg", "#ffffff"),
    ("--ef-card-bg", "#f8f9fa"),
    ("--ef-card-border", "#dee2e6"),
    ("--ef-text-primary", "#212529"),
    ("--ef-text-secondary", "#6c757d"),
    ("--ef-code-bg", "#f1f3f5"),
    ("--ef-code-text", "#c92a2a"),
    ("--ef-tip-bg", "#e9ecef"),
    ("--ef-tip-border", "#868e96"),
    ("--ef-cta-bg", "#f8f9fa"),
    ("--ef-cta-text", "#212529"),
    ("--ef-cta-btn-primary", "#212529"),
    ("--ef-cta-btn-secondary", "#ffffff"),
    ("--ef-table-header-bg", "#e9ecef"),
];

const DARK_PROFESSIONAL: Table = &[
    ("--ef-bg", "#0f172a"),
    ("--ef-card-bg", "#1e293b"),
    ("--ef-card-border", "#334155"),
    ("--ef-text-primary", "#f1f5f9"),
    ("--ef-text-secondary", "#cbd5e1"),
    ("--ef-code-bg", "#020617"),
    ("--ef-code-text", "#38bdf8"),
    ("--ef-tip-bg", "#1e293b"),
    ("--ef-tip-border", "#3b82f6"),
    ("--ef-cta-bg", "#334155"),
    ("--ef-cta-text", "#f1f5f9"),
    ("--ef-cta-btn-primary", "linear-gradient(135deg, #3b82f6, #2563eb)"),
    ("--ef-cta-btn-secondary", "rgba(255, 255, 255, 0.1)"),
    ("--ef-table-header-bg", "#334155"),
];

/// Named content themes in listing order
pub const CONTENT_THEMES: &[(&str, Table)] = &[
    ("glassmorphism", GLASSMORPHISM),
    ("simple-modern", SIMPLE_MODERN),
    ("colorful", COLORFUL),
    ("clean-white", CLEAN_WHITE),
    ("dark-professional", DARK_PROFESSIONAL),
];

pub fn content_table(name: &str) -> Option<Table> {
    CONTENT_THEMES
        .iter()
        .find(|(theme, _)| *theme == name)
        .map(|(_, table)| *table)
}

/// A content theme: a named table or a custom variable set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Theme {
    Named(String),
    Custom(BTreeMap<String, String>),
}

impl Theme {
    pub fn named(name: impl Into<String>) -> Self {
        Theme::Named(name.into())
    }

    /// Variables to emit; unknown names fall back to the default table
    pub fn variables(&self) -> Vec<(String, String)> {
        match self {
            Theme::Named(name) => content_table(name)
                .unwrap_or(GLASSMORPHISM)
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            Theme::Custom(vars) => vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }

    /// Inline style declaration list, `--ef-bg: ...; --ef-card-bg: ...`
    pub fn style(&self) -> String {
        self.variables()
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Read a theme back from a root element's inline style.
    ///
    /// Returns `None` when the style carries no `--ef-*` variables.
    pub fn from_style(style: &str) -> Option<Self> {
        let vars = extract_variables(style);
        if vars.is_empty() {
            return None;
        }

        let named = CONTENT_THEMES.iter().find(|(_, table)| {
            table.len() == vars.len()
                && table
                    .iter()
                    .all(|(k, v)| vars.get(*k).map(String::as_str) == Some(*v))
        });

        Some(match named {
            Some((name, _)) => Theme::named(*name),
            None => Theme::Custom(vars),
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::named(DEFAULT_THEME)
    }
}

/// `--ef-*` declarations of an inline style
pub fn extract_variables(style: &str) -> BTreeMap<String, String> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, value)| key.starts_with("--ef-") && !value.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_named_theme_detected_from_its_style() {
        for (name, _) in CONTENT_THEMES {
            let style = Theme::named(*name).style();
            assert_eq!(Theme::from_style(&style), Some(Theme::named(*name)));
        }
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert_eq!(Theme::named("neon").variables(), Theme::default().variables());
    }

    #[test]
    fn test_custom_theme_kept() {
        let theme = Theme::from_style("--ef-bg: #000; --ef-text-primary: #fff; color: red").unwrap();
        let Theme::Custom(vars) = &theme else {
            panic!("expected custom theme");
        };
        assert_eq!(vars.len(), 2);
        assert_eq!(vars["--ef-bg"], "#000");
    }

    #[test]
    fn test_style_without_variables() {
        assert_eq!(Theme::from_style("color: red; margin: 0"), None);
        assert_eq!(Theme::from_style(""), None);
    }

    #[test]
    fn test_serde_untagged() {
        let named: Theme = serde_json::from_str(r#""dark-professional""#).unwrap();
        assert_eq!(named, Theme::named("dark-professional"));
        let custom: Theme = serde_json::from_str(r##"{"--ef-bg":"#111"}"##).unwrap();
        assert!(matches!(custom, Theme::Custom(_)));
    }
}
