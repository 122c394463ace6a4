use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::LevelFilter;
use simplelog::SimpleLogger;
use theme::{
    theme_json_schema, unknown_ui_keys, validate, Severity, Theme, ThemeContent, ThemeRegistry,
};

/// Validates VS Code color theme documents before they get packaged.
#[derive(Parser)]
#[command(name = "theme_lint")]
struct Args {
    /// Theme files, or directories containing `*.json` theme documents.
    paths: Vec<PathBuf>,

    /// Also flag UI color keys outside the known host vocabulary, and treat
    /// warnings as failures.
    #[arg(long)]
    strict: bool,

    /// Print the JSON Schema for theme documents and exit.
    #[arg(long)]
    schema: bool,
}

#[derive(Default)]
struct Tally {
    themes: usize,
    parse_failures: usize,
    errors: usize,
    warnings: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    SimpleLogger::init(LevelFilter::Info, Default::default()).expect("could not initialize logger");

    if args.schema {
        let schema = theme_json_schema();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    if args.paths.is_empty() {
        return Err(anyhow!("no theme files given"));
    }

    let mut files = Vec::new();
    for path in &args.paths {
        if path.is_dir() {
            collect_theme_files(path, &mut files)
                .with_context(|| format!("failed to read directory {path:?}"))?;
        } else {
            files.push(path.clone());
        }
    }

    let mut registry = ThemeRegistry::default();
    let mut tally = Tally::default();

    for file in &files {
        lint_file(file, args.strict, &mut registry, &mut tally);
    }

    let mut names: Vec<_> = registry.list_names().collect();
    names.sort_unstable();
    log::info!(
        "checked {} document(s): {} loaded ({}), {} error(s), {} warning(s)",
        files.len(),
        tally.themes,
        names.join(", "),
        tally.errors,
        tally.warnings,
    );

    let failed = tally.parse_failures > 0
        || tally.errors > 0
        || (args.strict && tally.warnings > 0);
    if failed {
        return Err(anyhow!("validation failed"));
    }

    Ok(())
}

fn collect_theme_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|extension| extension == "json") {
            entries.push(path);
        }
    }
    entries.sort();
    files.extend(entries);
    Ok(())
}

fn lint_file(path: &Path, strict: bool, registry: &mut ThemeRegistry, tally: &mut Tally) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            log::error!("{}: {error}", path.display());
            tally.parse_failures += 1;
            return;
        }
    };

    let content = match ThemeContent::from_json(&source) {
        Ok(content) => content,
        Err(error) => {
            log::error!("{}: {error}", path.display());
            tally.parse_failures += 1;
            return;
        }
    };

    for issue in validate(&content) {
        match issue.severity {
            Severity::Error => {
                log::error!("{}: {issue}", path.display());
                tally.errors += 1;
            }
            Severity::Warning => {
                log::warn!("{}: {issue}", path.display());
                tally.warnings += 1;
            }
        }
    }

    if strict {
        for key in unknown_ui_keys(&content) {
            log::warn!(
                "{}: colors.{key}: not a known UI color key",
                path.display()
            );
            tally.warnings += 1;
        }
    }

    let theme = Theme::from_content(&content);
    log::info!(
        "{}: `{}` ({:?}): {} colors, {} token rules, {} semantic styles",
        path.display(),
        theme.name,
        theme.appearance,
        theme.colors.len(),
        theme.token_rules.len(),
        theme.semantic_styles.len(),
    );
    registry.insert_themes([theme]);
    tally.themes += 1;
}
