//! Persisted light/dark theme toggle.

use std::fmt;

use crate::config::InteractConfig;
use crate::dom::{LabelTarget, PreferenceStore, ThemeDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Only the exact strings `"light"` and `"dark"` are themes.
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn inverse(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeController<D, S, L> {
    document: D,
    store: S,
    toggle: L,
    storage_key: String,
    attribute: String,
    light_label: String,
    dark_label: String,
}

impl<D, S, L> ThemeController<D, S, L>
where
    D: ThemeDocument,
    S: PreferenceStore,
    L: LabelTarget,
{
    pub fn new(document: D, store: S, toggle: L, config: &InteractConfig) -> Self {
        Self {
            document,
            store,
            toggle,
            storage_key: config.storage_key.clone(),
            attribute: config.theme_attribute.clone(),
            light_label: config.light_label.clone(),
            dark_label: config.dark_label.clone(),
        }
    }

    /// The persisted preference, if it is a valid theme.
    pub fn stored_theme(&self) -> Option<Theme> {
        let raw = self.store.get(&self.storage_key)?;
        let theme = Theme::parse(&raw);
        if theme.is_none() {
            log::debug!("[theme] ignoring stored value {raw:?}");
        }
        theme
    }

    /// Theme currently shown by the document; dark when the attribute is
    /// absent or unrecognised.
    pub fn effective_theme(&self) -> Theme {
        self.document
            .attribute(&self.attribute)
            .and_then(|v| Theme::parse(&v))
            .unwrap_or_default()
    }

    /// Apply a valid persisted preference and label the toggle with the
    /// resulting theme. Without one, the document is left on its default.
    pub fn init(&self) -> Theme {
        let theme = match self.stored_theme() {
            Some(theme) => {
                self.document.set_attribute(&self.attribute, theme.as_str());
                theme
            }
            None => Theme::default(),
        };
        self.update_label(theme);
        log::debug!("[theme] init theme={theme}");
        theme
    }

    /// Switch to the other theme and persist it.
    ///
    /// A storage failure is logged; the page still switches.
    pub fn toggle(&self) -> Theme {
        let next = self.effective_theme().inverse();
        self.document.set_attribute(&self.attribute, next.as_str());
        if let Err(e) = self.store.set(&self.storage_key, next.as_str()) {
            log::warn!("[theme] could not persist theme={next}: {e}");
        }
        self.update_label(next);
        log::debug!("[theme] toggled theme={next}");
        next
    }

    fn update_label(&self, theme: Theme) {
        let label = match theme {
            Theme::Light => &self.light_label,
            Theme::Dark => &self.dark_label,
        };
        self.toggle.set_label(label);
    }
}
