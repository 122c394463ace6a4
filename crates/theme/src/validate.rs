use std::fmt;

use thiserror::Error;

use crate::color::try_parse_color;
use crate::schema::{AppearanceContent, ThemeContent};
use crate::styles::FontStyleFlags;

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The document is usable as-is; the finding is advisory.
    Warning,
    /// The entry violates a document invariant. A host would silently drop
    /// it; a packaging step should reject it.
    Error,
}

/// The category of a validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueKind {
    /// A color literal that is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("`{value}` is not a `#RRGGBB` or `#RRGGBBAA` color")]
    InvalidColor {
        /// The offending literal, verbatim.
        value: String,
    },
    /// A token rule scope that is empty or whitespace.
    #[error("scope strings must be non-empty")]
    EmptyScope,
    /// A `type` value outside the recognized appearance vocabulary.
    #[error("theme `type` must be one of `light`, `dark`, or `hc`")]
    UnknownAppearance,
    /// A `fontStyle` word outside the allowed modifier set.
    #[error("`{word}` is not one of `bold`, `italic`, `underline`, `strikethrough`")]
    UnknownFontStyle {
        /// The offending word.
        word: String,
    },
    /// The declared appearance disagrees with the editor background.
    #[error("declared appearance disagrees with the lightness of `editor.background`")]
    AppearanceMismatch,
}

/// A single validation finding, tied to the document location it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted location of the offending entry, e.g. `colors.editor.background`.
    pub path: String,
    /// What went wrong.
    pub kind: IssueKind,
    /// Whether the finding should fail a strict check.
    pub severity: Severity,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Checks every document invariant, collecting findings instead of failing.
///
/// Returns an empty list for a valid document. Invalid entries are reported
/// once each; the caller decides whether to reject the document or let
/// [`Theme::from_content`](crate::Theme::from_content) drop them.
pub fn validate(content: &ThemeContent) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if content.appearance == AppearanceContent::Unknown {
        issues.push(ValidationIssue {
            path: "type".into(),
            kind: IssueKind::UnknownAppearance,
            severity: Severity::Error,
        });
    }

    for (key, value) in &content.colors {
        check_color(&mut issues, format!("colors.{key}"), value);
    }

    for (index, rule) in content.token_colors.iter().enumerate() {
        let path = format!("tokenColors[{index}]");

        if let Some(scope) = &rule.scope {
            for scope in scope.to_vec() {
                if scope.trim().is_empty() {
                    issues.push(ValidationIssue {
                        path: format!("{path}.scope"),
                        kind: IssueKind::EmptyScope,
                        severity: Severity::Error,
                    });
                }
            }
        }

        check_style(&mut issues, &path, &rule.settings);
    }

    for (key, style) in &content.semantic_token_colors {
        let path = format!("semanticTokenColors.{key}");
        check_style(&mut issues, &path, style);
    }

    if let Some(issue) = appearance_mismatch(content) {
        issues.push(issue);
    }

    issues
}

fn check_style(
    issues: &mut Vec<ValidationIssue>,
    path: &str,
    style: &crate::schema::TokenStyleContent,
) {
    if let Some(foreground) = &style.foreground {
        check_color(issues, format!("{path}.settings.foreground"), foreground);
    }
    if let Some(background) = &style.background {
        check_color(issues, format!("{path}.settings.background"), background);
    }
    if let Some(font_style) = &style.font_style {
        for word in font_style.split_whitespace() {
            if !FontStyleFlags::ALLOWED_WORDS.contains(&word) {
                issues.push(ValidationIssue {
                    path: format!("{path}.settings.fontStyle"),
                    kind: IssueKind::UnknownFontStyle {
                        word: word.to_string(),
                    },
                    severity: Severity::Error,
                });
            }
        }
    }
}

fn check_color(issues: &mut Vec<ValidationIssue>, path: String, value: &str) {
    if try_parse_color(value).is_err() {
        issues.push(ValidationIssue {
            path,
            kind: IssueKind::InvalidColor {
                value: value.to_string(),
            },
            severity: Severity::Error,
        });
    }
}

fn appearance_mismatch(content: &ThemeContent) -> Option<ValidationIssue> {
    let background = content.colors.get("editor.background")?;
    let lightness = try_parse_color(background).ok()?.lightness();

    let mismatch = match content.appearance {
        AppearanceContent::Light => lightness < 0.5,
        AppearanceContent::Dark | AppearanceContent::HighContrast => lightness > 0.5,
        AppearanceContent::Unknown => false,
    };

    mismatch.then(|| ValidationIssue {
        path: "colors.editor.background".into(),
        kind: IssueKind::AppearanceMismatch,
        severity: Severity::Warning,
    })
}

/// Returns the `colors` keys that are not part of the known host vocabulary.
///
/// Unrecognized keys are never an error: hosts ignore them. This exists for
/// strict lint runs that want to catch typos like `editor.backgruond`.
pub fn unknown_ui_keys(content: &ThemeContent) -> Vec<&str> {
    content
        .colors
        .keys()
        .map(String::as_str)
        .filter(|key| !KNOWN_UI_KEYS.contains(key))
        .collect()
}

/// The UI-region keys recognized by the consuming host.
///
/// A representative subset of the editor's color registry; enough to cover
/// the regions a color theme package actually styles.
pub static KNOWN_UI_KEYS: &[&str] = &[
    "activityBar.activeBorder",
    "activityBar.background",
    "activityBar.foreground",
    "activityBar.inactiveForeground",
    "activityBarBadge.background",
    "activityBarBadge.foreground",
    "badge.background",
    "badge.foreground",
    "breadcrumb.background",
    "breadcrumb.focusForeground",
    "breadcrumb.foreground",
    "button.background",
    "button.foreground",
    "button.secondaryBackground",
    "button.secondaryForeground",
    "diffEditor.insertedTextBackground",
    "diffEditor.removedTextBackground",
    "dropdown.background",
    "dropdown.border",
    "dropdown.foreground",
    "editor.background",
    "editor.findMatchBackground",
    "editor.findMatchHighlightBackground",
    "editor.foldBackground",
    "editor.foreground",
    "editor.hoverHighlightBackground",
    "editor.lineHighlightBackground",
    "editor.lineHighlightBorder",
    "editor.rangeHighlightBackground",
    "editor.selectionBackground",
    "editor.selectionHighlightBackground",
    "editor.wordHighlightBackground",
    "editor.wordHighlightStrongBackground",
    "editorBracketMatch.background",
    "editorBracketMatch.border",
    "editorCodeLens.foreground",
    "editorCursor.foreground",
    "editorError.foreground",
    "editorGroup.border",
    "editorGroupHeader.tabsBackground",
    "editorGutter.addedBackground",
    "editorGutter.deletedBackground",
    "editorGutter.modifiedBackground",
    "editorHoverWidget.background",
    "editorHoverWidget.border",
    "editorIndentGuide.activeBackground",
    "editorIndentGuide.background",
    "editorInfo.foreground",
    "editorLineNumber.activeForeground",
    "editorLineNumber.foreground",
    "editorLink.activeForeground",
    "editorOverviewRuler.border",
    "editorRuler.foreground",
    "editorSuggestWidget.background",
    "editorSuggestWidget.foreground",
    "editorSuggestWidget.selectedBackground",
    "editorWarning.foreground",
    "editorWhitespace.foreground",
    "editorWidget.background",
    "errorForeground",
    "focusBorder",
    "foreground",
    "gitDecoration.conflictingResourceForeground",
    "gitDecoration.deletedResourceForeground",
    "gitDecoration.ignoredResourceForeground",
    "gitDecoration.modifiedResourceForeground",
    "gitDecoration.untrackedResourceForeground",
    "input.background",
    "input.border",
    "input.foreground",
    "input.placeholderForeground",
    "list.activeSelectionBackground",
    "list.activeSelectionForeground",
    "list.errorForeground",
    "list.focusBackground",
    "list.highlightForeground",
    "list.hoverBackground",
    "list.inactiveSelectionBackground",
    "list.warningForeground",
    "panel.background",
    "panel.border",
    "panelTitle.activeBorder",
    "panelTitle.activeForeground",
    "panelTitle.inactiveForeground",
    "peekView.border",
    "progressBar.background",
    "scrollbar.shadow",
    "scrollbarSlider.activeBackground",
    "scrollbarSlider.background",
    "scrollbarSlider.hoverBackground",
    "selection.background",
    "sideBar.background",
    "sideBar.border",
    "sideBar.foreground",
    "sideBarSectionHeader.background",
    "sideBarTitle.foreground",
    "statusBar.background",
    "statusBar.debuggingBackground",
    "statusBar.debuggingForeground",
    "statusBar.foreground",
    "statusBar.noFolderBackground",
    "tab.activeBackground",
    "tab.activeBorderTop",
    "tab.activeForeground",
    "tab.border",
    "tab.inactiveBackground",
    "tab.inactiveForeground",
    "terminal.ansiBlack",
    "terminal.ansiBlue",
    "terminal.ansiBrightBlack",
    "terminal.ansiBrightBlue",
    "terminal.ansiBrightCyan",
    "terminal.ansiBrightGreen",
    "terminal.ansiBrightMagenta",
    "terminal.ansiBrightRed",
    "terminal.ansiBrightWhite",
    "terminal.ansiBrightYellow",
    "terminal.ansiCyan",
    "terminal.ansiGreen",
    "terminal.ansiMagenta",
    "terminal.ansiRed",
    "terminal.ansiWhite",
    "terminal.ansiYellow",
    "terminal.background",
    "terminal.foreground",
    "titleBar.activeBackground",
    "titleBar.activeForeground",
    "titleBar.inactiveBackground",
    "titleBar.inactiveForeground",
];
