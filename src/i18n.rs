use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::De,
            Locale::De => Locale::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextKey {
    AppTitle,
    Footer,
    ThemeToggle,
    LangToggle,
    NewPrompt,
    AllPrompts,
    TagFilterTitle,
    NewPromptTitle,
    TitleLabel,
    DescriptionLabel,
    ContentLabel,
    TagsLabel,
    SavePrompt,
    Cancel,
    Back,
    Copy,
    Copied,
    CopyFailed,
    Loading,
    NoPrompts,
}

pub fn text(locale: Locale, key: TextKey) -> &'static str {
    match locale {
        Locale::En => english(key),
        Locale::De => german(key),
    }
}

fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::AppTitle => "Prompt Gallery",
        TextKey::Footer => "Made by derjannik",
        TextKey::ThemeToggle => "Toggle Theme",
        // The toggle names the language it switches to.
        TextKey::LangToggle => "Deutsch",
        TextKey::NewPrompt => "New Prompt",
        TextKey::AllPrompts => "All Prompts",
        TextKey::TagFilterTitle => "Tagged",
        TextKey::NewPromptTitle => "Create New Prompt",
        TextKey::TitleLabel => "Title",
        TextKey::DescriptionLabel => "Description",
        TextKey::ContentLabel => "Content",
        TextKey::TagsLabel => "Tags (comma-separated)",
        TextKey::SavePrompt => "Save Prompt",
        TextKey::Cancel => "Cancel",
        TextKey::Back => "Back",
        TextKey::Copy => "Copy",
        TextKey::Copied => "Copied!",
        TextKey::CopyFailed => "Copy failed",
        TextKey::Loading => "Loading prompts...",
        TextKey::NoPrompts => "No prompts found.",
    }
}

fn german(key: TextKey) -> &'static str {
    match key {
        TextKey::AppTitle => "Prompt Galerie",
        TextKey::Footer => "Erstellt von derjannik",
        TextKey::ThemeToggle => "Theme wechseln",
        TextKey::LangToggle => "English",
        TextKey::NewPrompt => "Neuer Prompt",
        TextKey::AllPrompts => "Alle Prompts",
        TextKey::TagFilterTitle => "Getaggt",
        TextKey::NewPromptTitle => "Neuen Prompt erstellen",
        TextKey::TitleLabel => "Titel",
        TextKey::DescriptionLabel => "Beschreibung",
        TextKey::ContentLabel => "Inhalt",
        TextKey::TagsLabel => "Tags (kommagetrennt)",
        TextKey::SavePrompt => "Prompt speichern",
        TextKey::Cancel => "Abbrechen",
        TextKey::Back => "Zurück",
        TextKey::Copy => "Kopieren",
        TextKey::Copied => "Kopiert!",
        TextKey::CopyFailed => "Kopieren fehlgeschlagen",
        TextKey::Loading => "Prompts werden geladen...",
        TextKey::NoPrompts => "Keine Prompts gefunden.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_between_two_locales() {
        assert_eq!(Locale::En.toggled(), Locale::De);
        assert_eq!(Locale::En.toggled().toggled(), Locale::En);
    }

    #[test]
    fn tables_differ_per_locale() {
        assert_eq!(text(Locale::En, TextKey::Copy), "Copy");
        assert_eq!(text(Locale::De, TextKey::Copy), "Kopieren");
        assert_eq!(text(Locale::De, TextKey::Back), "Zurück");
    }
}
