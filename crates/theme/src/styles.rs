#![allow(missing_docs)]

use crate::color::{try_parse_color, Rgba};
use crate::schema::TokenStyleContent;

/// Font style modifiers a token rule may set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontStyleFlags {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl FontStyleFlags {
    /// The words a `fontStyle` value may contain.
    pub const ALLOWED_WORDS: &'static [&'static str] =
        &["bold", "italic", "underline", "strikethrough"];

    /// Parses a `fontStyle` value. Words outside [`Self::ALLOWED_WORDS`] are
    /// skipped here; `validate` reports them.
    pub fn parse(font_style: &str) -> Self {
        let mut flags = Self::default();
        for word in font_style.split_whitespace() {
            match word {
                "bold" => flags.bold = true,
                "italic" => flags.italic = true,
                "underline" => flags.underline = true,
                "strikethrough" => flags.strikethrough = true,
                _ => {}
            }
        }
        flags
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The resolved style settings of a token rule or semantic token entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStyle {
    pub foreground: Option<Rgba>,
    pub background: Option<Rgba>,
    pub font_style: FontStyleFlags,
}

impl TokenStyle {
    pub fn is_empty(&self) -> bool {
        self.foreground.is_none() && self.background.is_none() && self.font_style.is_empty()
    }

    /// Builds a style from its document form, dropping color literals that
    /// do not parse. Hosts ignore invalid entries rather than rejecting the
    /// theme; strict callers run `validate` first.
    pub(crate) fn from_content(content: &TokenStyleContent) -> Self {
        Self {
            foreground: content
                .foreground
                .as_deref()
                .and_then(|color| try_parse_color(color).ok()),
            background: content
                .background
                .as_deref()
                .and_then(|color| try_parse_color(color).ok()),
            font_style: content
                .font_style
                .as_deref()
                .map(FontStyleFlags::parse)
                .unwrap_or_default(),
        }
    }
}

/// A token rule after resolution: scope selectors plus the style they apply.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRule {
    pub scopes: Vec<String>,
    pub style: TokenStyle,
}

/// Returns whether `selector` matches `scope` at a dot boundary.
///
/// `keyword` matches `keyword` and `keyword.control`, but not
/// `keywords` or `keyword2`.
pub(crate) fn selector_matches_scope(selector: &str, scope: &str) -> bool {
    if !scope.starts_with(selector) {
        return false;
    }
    scope.len() == selector.len() || scope.as_bytes()[selector.len()] == b'.'
}

/// Resolves the style for a token's scope stack against an ordered rule list.
///
/// Among every (rule, selector) pair where the selector matches some element
/// of the stack, the longest selector wins; equally specific selectors are
/// broken by later rule position. No match yields the default style, leaving
/// the host's base styling in effect.
pub(crate) fn resolve_token_style(rules: &[TokenRule], scope_stack: &[&str]) -> TokenStyle {
    let mut best: Option<(usize, usize)> = None;
    let mut style = TokenStyle::default();

    for (index, rule) in rules.iter().enumerate() {
        for selector in &rule.scopes {
            let matched = scope_stack
                .iter()
                .any(|scope| selector_matches_scope(selector, scope));
            if !matched {
                continue;
            }

            let candidate = (selector.len(), index);
            if best.map_or(true, |current| candidate >= current) {
                best = Some(candidate);
                style = rule.style.clone();
            }
        }
    }

    style
}
