#![deny(missing_docs)]

//! # Theme
//!
//! This crate models VS Code color theme documents: the `colors` UI mapping,
//! the ordered `tokenColors` rules, and the optional `semanticTokenColors`
//! table.
//!
//! ## Overview
//!
//! A document is loaded into a loss-preserving [`ThemeContent`], checked with
//! [`validate`], and resolved into a read-only [`Theme`] that answers the two
//! queries a host makes on activation: [`Theme::color`] for UI regions and
//! [`Theme::token_style`] for a token's scope stack. All of it is pure and
//! immutable once built, so the types are freely shareable across threads.

mod color;
mod registry;
mod schema;
mod styles;
mod validate;

use indexmap::IndexMap;

pub use color::*;
pub use registry::*;
pub use schema::*;
pub use styles::*;
pub use validate::*;

/// The appearance of the theme.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Appearance {
    /// A light appearance.
    Light,
    /// A dark appearance.
    #[default]
    Dark,
    /// A high-contrast appearance.
    HighContrast,
}

impl Appearance {
    /// Returns whether the appearance is light.
    pub fn is_light(&self) -> bool {
        matches!(self, Self::Light)
    }
}

impl From<AppearanceContent> for Appearance {
    fn from(value: AppearanceContent) -> Self {
        match value {
            AppearanceContent::Light => Self::Light,
            AppearanceContent::Dark => Self::Dark,
            AppearanceContent::HighContrast => Self::HighContrast,
            // Hosts treat an unrecognized type as dark.
            AppearanceContent::Unknown => Self::Dark,
        }
    }
}

/// A resolved theme: the read-only, queryable view of a theme document.
///
/// Construction is forgiving, matching how hosts actually behave: entries
/// with unparseable colors or empty scopes are dropped rather than failing
/// the theme. Callers that want strictness run [`validate`] on the content
/// first and reject on [`Severity::Error`] findings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    /// The name of the theme.
    pub name: String,
    /// The appearance of the theme (light, dark, or high-contrast).
    pub appearance: Appearance,
    /// UI-region colors, in document order.
    pub colors: IndexMap<String, Rgba>,
    /// Token rules, in document order. Order drives the cascade tie-break.
    pub token_rules: Vec<TokenRule>,
    /// Semantic token styles, keyed by semantic token type.
    pub semantic_styles: IndexMap<String, TokenStyle>,
    /// Whether the document opted in to semantic highlighting.
    pub semantic_highlighting: bool,
}

impl Theme {
    /// Builds a resolved theme from its document form.
    pub fn from_content(content: &ThemeContent) -> Self {
        let mut colors = IndexMap::new();
        for (key, value) in &content.colors {
            if let Ok(color) = Rgba::try_from(value.as_str()) {
                colors.insert(key.clone(), color);
            }
        }

        let mut token_rules = Vec::new();
        for rule in &content.token_colors {
            let Some(scope) = &rule.scope else {
                continue;
            };

            let scopes: Vec<String> = scope
                .to_vec()
                .iter()
                .map(|scope| scope.trim().to_string())
                .filter(|scope| !scope.is_empty())
                .collect();
            if scopes.is_empty() {
                continue;
            }

            let style = TokenStyle::from_content(&rule.settings);
            if style.is_empty() {
                continue;
            }

            token_rules.push(TokenRule { scopes, style });
        }

        let mut semantic_styles = IndexMap::new();
        for (token_type, style) in &content.semantic_token_colors {
            let style = TokenStyle::from_content(style);
            if style.is_empty() {
                continue;
            }
            semantic_styles.insert(token_type.clone(), style);
        }

        Self {
            name: content.name.clone().unwrap_or_else(|| "Untitled".into()),
            appearance: content.appearance.into(),
            colors,
            token_rules,
            semantic_styles,
            semantic_highlighting: content.semantic_highlighting.unwrap_or(false),
        }
    }

    /// Returns the color for a UI-region key.
    ///
    /// Total over any input: unknown and absent keys yield `None`, matching
    /// the host's ignore-unknown policy. Never an error.
    pub fn color(&self, key: &str) -> Option<Rgba> {
        self.colors.get(key).copied()
    }

    /// Resolves the style for a token given its full scope stack, most
    /// specific scope last.
    ///
    /// The most specific (longest) matching scope selector wins; equally
    /// specific selectors resolve to the later rule in authoring order. With
    /// no rules or no match, the returned style is empty and the host's
    /// default styling applies.
    pub fn token_style(&self, scope_stack: &[&str]) -> TokenStyle {
        resolve_token_style(&self.token_rules, scope_stack)
    }

    /// Looks up the style for a semantic token type.
    pub fn semantic_style(&self, token_type: &str) -> Option<&TokenStyle> {
        self.semantic_styles.get(token_type)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn resolves_ui_colors_end_to_end() {
        let content = ThemeContent::from_json(
            r##"{
                "name": "Probe",
                "type": "dark",
                "colors": { "editor.background": "#1a1f2e" }
            }"##,
        )
        .unwrap();
        let theme = Theme::from_content(&content);

        let background = theme.color("editor.background").unwrap();
        assert_eq!(background.to_hex(), "#1a1f2e");
        assert_eq!(theme.color("nonexistent.key"), None);
    }

    #[test]
    fn scope_cascade_prefers_the_most_specific_rule() {
        let content = ThemeContent::from_json(
            r##"{
                "name": "Cascade",
                "type": "dark",
                "tokenColors": [
                    { "scope": "keyword", "settings": { "foreground": "#aa0000" } },
                    { "scope": "keyword.control", "settings": { "foreground": "#00bb00" } }
                ]
            }"##,
        )
        .unwrap();
        let theme = Theme::from_content(&content);

        let control = theme.token_style(&["source.ts", "keyword.control"]);
        assert_eq!(control.foreground.unwrap().to_hex(), "#00bb00");

        let other = theme.token_style(&["source.ts", "keyword.other"]);
        assert_eq!(other.foreground.unwrap().to_hex(), "#aa0000");
    }

    #[test]
    fn empty_token_rules_resolve_the_default_style() {
        let content =
            ThemeContent::from_json(r#"{ "name": "Bare", "type": "dark" }"#).unwrap();
        let theme = Theme::from_content(&content);

        assert!(theme.token_style(&["keyword.control"]).is_empty());
        assert!(theme.token_style(&[]).is_empty());
    }

    #[test]
    fn construction_drops_invalid_entries_instead_of_failing() {
        let content = ThemeContent::from_json(
            r##"{
                "name": "Forgiving",
                "type": "dark",
                "colors": {
                    "editor.background": "#1a1f2e",
                    "editor.foreground": "oops"
                },
                "tokenColors": [
                    { "scope": "", "settings": { "foreground": "#c792ea" } },
                    { "scope": "comment", "settings": { "foreground": "#637777" } }
                ]
            }"##,
        )
        .unwrap();

        assert!(!validate(&content).is_empty());

        let theme = Theme::from_content(&content);
        assert_eq!(theme.colors.len(), 1);
        assert_eq!(theme.token_rules.len(), 1);
        assert_eq!(theme.token_rules[0].scopes, vec!["comment".to_string()]);
    }

    #[test]
    fn semantic_styles_resolve_by_direct_lookup() {
        let content = ThemeContent::from_json(
            r##"{
                "name": "Semantic",
                "type": "dark",
                "semanticHighlighting": true,
                "semanticTokenColors": {
                    "variable.readonly": { "foreground": "#82aaff" }
                }
            }"##,
        )
        .unwrap();
        let theme = Theme::from_content(&content);

        assert!(theme.semantic_highlighting);
        let style = theme.semantic_style("variable.readonly").unwrap();
        assert_eq!(style.foreground.unwrap().to_hex(), "#82aaff");
        assert_eq!(theme.semantic_style("function"), None);
    }

    #[test]
    fn bundled_theme_loads_and_validates_clean() {
        let source = include_str!("../../../assets/themes/meridian-dark-color-theme.json");
        let content = ThemeContent::from_json(source).unwrap();

        assert_eq!(validate(&content), Vec::new());
        assert_eq!(unknown_ui_keys(&content), Vec::<&str>::new());

        let theme = Theme::from_content(&content);
        assert_eq!(theme.name, "Meridian Dark");
        assert_eq!(theme.appearance, Appearance::Dark);
        assert_eq!(
            theme.color("editor.background").unwrap().to_hex(),
            "#1a1f2e"
        );
        assert!(!theme.token_style(&["keyword.control.flow"]).is_empty());
    }
}
