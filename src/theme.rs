use serde::{Deserialize, Serialize};

use crate::config::THEME_KEY;
use crate::error::Result;
use crate::store::KeyValueStore;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as light.
    pub fn parse(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Document class to add for this theme.
    pub fn class(self) -> &'static str {
        match self {
            Theme::Light => "light-mode",
            Theme::Dark => "dark-mode",
        }
    }

    /// Document class to remove so that exactly one theme class is present.
    pub fn opposite_class(self) -> &'static str {
        self.toggled().class()
    }
}

pub fn load(store: &impl KeyValueStore) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(value)) => Theme::parse(&value),
        Ok(None) => Theme::default(),
        Err(err) => {
            log::warn!("reading theme preference failed: {err}");
            Theme::default()
        }
    }
}

/// Flips the stored preference and returns the theme to apply.
pub fn toggle(store: &mut impl KeyValueStore) -> Result<Theme> {
    let next = load(store).toggled();
    store.set(THEME_KEY, next.as_str())?;
    Ok(next)
}
