use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::Theme;

/// A store of resolved themes, keyed by name.
///
/// A host keeps one of these around and swaps the active theme on selection;
/// the lint CLI uses it to hold every theme loaded from a directory.
#[derive(Default)]
pub struct ThemeRegistry {
    themes: HashMap<String, Arc<Theme>>,
}

impl ThemeRegistry {
    /// Inserts themes into the registry, replacing same-named entries.
    pub fn insert_themes(&mut self, themes: impl IntoIterator<Item = Theme>) {
        for theme in themes.into_iter() {
            self.themes.insert(theme.name.clone(), Arc::new(theme));
        }
    }

    /// Returns the names of all registered themes.
    pub fn list_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.themes.keys().map(String::as_str)
    }

    /// Looks up a theme by name.
    pub fn get(&self, name: &str) -> Result<Arc<Theme>> {
        self.themes
            .get(name)
            .ok_or_else(|| anyhow!("theme not found: {}", name))
            .cloned()
    }

    /// Returns the number of registered themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
