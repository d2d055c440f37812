//! Persisted theme preference.

use std::fmt;

use istore_core::Theme;
use tracing::{debug, warn};

use crate::storage::{SharedStore, keys};

/// The current theme, loaded from and saved to the key-value store.
pub struct ThemePreference {
    current: Theme,
    store: SharedStore,
}

impl fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreference")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl ThemePreference {
    /// Load the saved theme, falling back to `preferred` when nothing valid
    /// has been saved.
    pub fn load(store: SharedStore, preferred: Theme) -> Self {
        let current = match store.get(keys::THEME) {
            Ok(Some(raw)) => raw.parse::<Theme>().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring saved theme");
                preferred
            }),
            Ok(None) => preferred,
            Err(e) => {
                warn!(error = %e, "Failed to read theme preference");
                preferred
            }
        };
        Self { current, store }
    }

    #[must_use]
    pub const fn current(&self) -> Theme {
        self.current
    }

    /// Switch to `theme` and save it.
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        debug!(%theme, "Theme changed");
        if let Err(e) = self.store.set(keys::THEME, theme.as_str()) {
            warn!(error = %e, "Failed to persist theme");
        }
    }

    /// Flip between dark and light, returning the new theme.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.set(next);
        next
    }
}
