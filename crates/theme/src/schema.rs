#![allow(missing_docs)]

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// The error returned when a theme document cannot be read or written.
///
/// Parsing fails closed: a malformed document never yields a partially
/// loaded theme.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed theme document: {0}")]
    Json(#[from] serde_json_lenient::Error),
    #[error("theme document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to serialize theme document: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_empty()))
}

/// The appearance of a theme, from the document's `type` key.
///
/// Values outside the recognized vocabulary deserialize to [`Self::Unknown`]
/// rather than failing the whole load, so `validate` can report them.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceContent {
    Light,
    #[default]
    Dark,
    #[serde(rename = "hc", alias = "high-contrast")]
    HighContrast,
    #[serde(other)]
    Unknown,
}

/// The content of a serialized color theme document.
///
/// This is a loss-preserving view of the on-disk format: color values stay
/// as the strings the author wrote, and `tokenColors` keeps its authoring
/// order, which is part of the cascade contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ThemeContent {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[serde(
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<String>,

    #[serde(rename = "type")]
    pub appearance: AppearanceContent,

    #[serde(
        rename = "semanticHighlighting",
        skip_serializing_if = "Option::is_none"
    )]
    pub semantic_highlighting: Option<bool>,

    /// UI-region key to color literal.
    pub colors: IndexMap<String, String>,

    #[serde(rename = "tokenColors")]
    pub token_colors: Vec<TokenColorContent>,

    #[serde(
        rename = "semanticTokenColors",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub semantic_token_colors: IndexMap<String, TokenStyleContent>,
}

impl ThemeContent {
    /// Deserializes a theme document from JSON.
    ///
    /// Theme files are JSONC in practice, so comments and trailing commas
    /// are accepted.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json_lenient::from_str(json)?)
    }

    /// Deserializes a theme document from raw bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::from_json(std::str::from_utf8(bytes)?)
    }

    /// Serializes the document back to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A single entry of `tokenColors`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TokenColorContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeContent>,

    pub settings: TokenStyleContent,
}

/// The scope selector of a token rule: a single string or a list of them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum ScopeContent {
    One(String),
    Many(Vec<String>),
}

impl ScopeContent {
    /// Returns the selector as a list of scope strings.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(scope) => vec![scope.clone()],
            Self::Many(scopes) => scopes.clone(),
        }
    }
}

/// Style settings shared by token rules and semantic token entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct TokenStyleContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Space-separated subset of `bold italic underline strikethrough`.
    #[serde(rename = "fontStyle", skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
}

/// Returns the JSON Schema for theme documents.
pub fn theme_json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(ThemeContent)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn loads_a_minimal_document() {
        let content = ThemeContent::from_json(
            r##"{
                "name": "Test",
                "type": "dark",
                "colors": { "editor.background": "#1a1f2e" },
                "tokenColors": [
                    { "scope": "keyword", "settings": { "foreground": "#c792ea" } }
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(content.name.as_deref(), Some("Test"));
        assert_eq!(content.appearance, AppearanceContent::Dark);
        assert_eq!(content.colors["editor.background"], "#1a1f2e");
        assert_eq!(
            content.token_colors[0].scope,
            Some(ScopeContent::One("keyword".into()))
        );
    }

    #[test]
    fn loads_jsonc_documents() {
        let content = ThemeContent::from_json(
            r##"{
                // Comments and trailing commas are part of the format in the wild.
                "name": "Commented",
                "type": "light",
                "colors": {
                    "editor.background": "#fdf6e3",
                },
            }"##,
        )
        .unwrap();

        assert_eq!(content.appearance, AppearanceContent::Light);
        assert_eq!(content.colors.len(), 1);
    }

    #[test]
    fn malformed_syntax_fails_closed() {
        assert!(ThemeContent::from_json("{ \"name\": ").is_err());
        assert!(ThemeContent::from_json_bytes(&[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn unknown_type_is_not_a_parse_failure() {
        let content =
            ThemeContent::from_json(r#"{ "name": "Odd", "type": "sepia", "colors": {} }"#).unwrap();
        assert_eq!(content.appearance, AppearanceContent::Unknown);
    }

    #[test]
    fn high_contrast_aliases() {
        for value in ["hc", "high-contrast"] {
            let content = ThemeContent::from_json(&format!(r#"{{ "type": "{value}" }}"#)).unwrap();
            assert_eq!(content.appearance, AppearanceContent::HighContrast);
        }
    }

    #[test]
    fn reserializing_and_reloading_is_lossless() {
        let source = r##"{
            "name": "Round Trip",
            "type": "dark",
            "semanticHighlighting": true,
            "colors": {
                "editor.background": "#1a1f2e",
                "editor.foreground": "#d6deeb"
            },
            "tokenColors": [
                { "name": "Keywords", "scope": ["keyword", "storage"], "settings": { "foreground": "#c792ea", "fontStyle": "italic" } },
                { "scope": "comment", "settings": { "foreground": "#637777" } }
            ],
            "semanticTokenColors": {
                "variable.readonly": { "foreground": "#82aaff" }
            }
        }"##;

        let content = ThemeContent::from_json(source).unwrap();
        let reloaded = ThemeContent::from_json(&content.to_json_string().unwrap()).unwrap();
        assert_eq!(content, reloaded);
    }
}
