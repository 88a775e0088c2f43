//! Light/dark theme preference.

use crate::page::Document;
use crate::storage::KeyValueStore;
use serde::Serialize;
use std::cell::Cell;
use tracing::{debug, warn};

/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "gh-theme";

/// Applied page theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the stored representation (`"light"` or `"dark"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Returns the opposite theme.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Label shown on the toggle control.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

/// Reads the terminal's dark-background signal from `COLORFGBG`.
///
/// The variable holds `foreground;background` colour indices (sometimes with
/// a middle field); backgrounds 0-6 and 8 are dark.
#[must_use]
pub fn detect_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| value.rsplit(';').next()?.trim().parse::<u8>().ok())
        .is_some_and(|background| background <= 6 || background == 8)
}

/// Resolves, applies and toggles the persisted theme.
#[derive(Debug)]
pub struct ThemeController<K> {
    store: K,
    document: Document,
    prefers_dark: bool,
    current: Cell<Theme>,
}

impl<K: KeyValueStore> ThemeController<K> {
    /// Creates a controller. `prefers_dark` is the system dark-mode signal
    /// used when nothing is stored.
    pub fn new(store: K, document: Document, prefers_dark: bool) -> Self {
        Self {
            store,
            document,
            prefers_dark,
            current: Cell::new(Theme::Light),
        }
    }

    /// Resolves the initial theme from the stored preference, then the
    /// system signal, then light, and applies it.
    pub fn init(&self) -> Theme {
        let stored = match self.store.get(THEME_KEY) {
            Ok(value) => value.as_deref().and_then(Theme::parse),
            Err(e) => {
                warn!(error = %e, "Failed to read theme preference");
                None
            }
        };

        let theme = stored.unwrap_or(if self.prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });

        debug!(theme = theme.as_str(), stored = stored.is_some(), "Theme resolved");
        self.apply(theme);
        theme
    }

    /// Flips the applied theme, persists it and re-applies it.
    pub fn toggle(&self) -> Theme {
        let next = self.current.get().flipped();

        if let Err(e) = self.store.set(THEME_KEY, next.as_str()) {
            warn!(error = %e, "Failed to persist theme preference");
        }

        self.apply(next);
        next
    }

    /// Returns the applied theme.
    pub fn current(&self) -> Theme {
        self.current.get()
    }

    fn apply(&self, theme: Theme) {
        self.current.set(theme);
        self.document.update(|page| {
            page.theme = theme;
            page.toggle.pressed = theme == Theme::Dark;
            page.toggle.label = theme.label().to_string();
        });
    }
}
