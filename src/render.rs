//! Pure description of what the page shows for a given [`Gallery`].
//!
//! Every interactive region carries the [`Action`] it dispatches, so the host
//! only mounts the [`Screen`] and forwards events.

use crate::i18n::{text, Locale, TextKey};
use crate::model::PromptRecord;
use crate::store::KeyValueStore;
use crate::view_state::{Action, CopyFeedback, CopyOutcome, Gallery, ViewState};

#[derive(Clone, Debug, PartialEq)]
pub struct Screen {
    pub chrome: Chrome,
    pub body: Body,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Chrome {
    pub lang: &'static str,
    pub app_title: &'static str,
    pub footer: &'static str,
    pub theme_toggle: Button,
    pub lang_toggle: Button,
    pub new_prompt: Button,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    List(ListView),
    Detail(DetailView),
    Form(FormView),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListView {
    pub heading: String,
    pub back: Option<Button>,
    pub chips: Vec<Chip>,
    pub cards: Vec<Card>,
    pub placeholder: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Chip {
    pub label: String,
    pub active: bool,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub source_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailView {
    pub back: Button,
    pub copy: Button,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub body_html: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormView {
    pub heading: &'static str,
    pub title_label: &'static str,
    pub description_label: &'static str,
    pub content_label: &'static str,
    pub tags_label: &'static str,
    pub save_label: &'static str,
    pub cancel: Button,
    pub known_tags: Vec<String>,
}

pub fn render<S: KeyValueStore>(gallery: &Gallery<S>) -> Screen {
    let locale = gallery.locale();
    let t = |key| text(locale, key);
    let chrome = Chrome {
        lang: locale.code(),
        app_title: t(TextKey::AppTitle),
        footer: t(TextKey::Footer),
        theme_toggle: Button {
            label: t(TextKey::ThemeToggle),
            action: Action::ToggleTheme,
        },
        lang_toggle: Button {
            label: t(TextKey::LangToggle),
            action: Action::ToggleLocale,
        },
        new_prompt: Button {
            label: t(TextKey::NewPrompt),
            action: Action::NewPrompt,
        },
    };

    let repo = gallery.repository();
    let body = match gallery.state() {
        ViewState::Home => list(gallery, None),
        ViewState::TagFilter { tag } => list(gallery, Some(tag.as_str())),
        ViewState::Detail { source_id, .. } => match repo.get(source_id) {
            Some(record) => Body::Detail(detail(record, locale, gallery.copy_feedback())),
            None => list(gallery, None),
        },
        ViewState::CreateForm => Body::Form(FormView {
            heading: t(TextKey::NewPromptTitle),
            title_label: t(TextKey::TitleLabel),
            description_label: t(TextKey::DescriptionLabel),
            content_label: t(TextKey::ContentLabel),
            tags_label: t(TextKey::TagsLabel),
            save_label: t(TextKey::SavePrompt),
            cancel: Button {
                label: t(TextKey::Cancel),
                action: Action::Cancel,
            },
            known_tags: repo.all_tags(),
        }),
    };

    Screen { chrome, body }
}

fn list<S: KeyValueStore>(gallery: &Gallery<S>, filter: Option<&str>) -> Body {
    let locale = gallery.locale();
    let repo = gallery.repository();

    let chips = repo
        .all_tags()
        .into_iter()
        .map(|tag| {
            let active = filter == Some(tag.as_str());
            Chip {
                action: if active {
                    Action::Back
                } else {
                    Action::OpenTag(tag.clone())
                },
                label: tag,
                active,
            }
        })
        .collect();

    let cards: Vec<Card> = repo
        .records()
        .iter()
        .filter(|r| filter.map_or(true, |tag| r.has_tag(tag)))
        .map(card)
        .collect();

    let placeholder = if !cards.is_empty() {
        None
    } else if gallery.is_loaded() {
        Some(text(locale, TextKey::NoPrompts))
    } else {
        Some(text(locale, TextKey::Loading))
    };

    let (heading, back) = match filter {
        Some(tag) => (
            format!("{}: {tag}", text(locale, TextKey::TagFilterTitle)),
            Some(Button {
                label: text(locale, TextKey::Back),
                action: Action::Back,
            }),
        ),
        None => (text(locale, TextKey::AllPrompts).to_string(), None),
    };

    Body::List(ListView {
        heading,
        back,
        chips,
        cards,
        placeholder,
    })
}

fn card(record: &PromptRecord) -> Card {
    Card {
        source_id: record.source_id.clone(),
        title: record.title.clone(),
        description: record.description.clone(),
        tags: record.tags.clone(),
        action: Action::OpenRecord(record.source_id.clone()),
    }
}

fn detail(record: &PromptRecord, locale: Locale, feedback: CopyFeedback) -> DetailView {
    let copy_label = match feedback {
        CopyFeedback::Shown {
            outcome: CopyOutcome::Copied,
            ..
        } => TextKey::Copied,
        CopyFeedback::Shown {
            outcome: CopyOutcome::Failed,
            ..
        } => TextKey::CopyFailed,
        CopyFeedback::Idle | CopyFeedback::Pending(_) => TextKey::Copy,
    };
    DetailView {
        back: Button {
            label: text(locale, TextKey::Back),
            action: Action::Back,
        },
        copy: Button {
            label: text(locale, copy_label),
            action: Action::Copy,
        },
        title: record.title.clone(),
        description: record.description.clone(),
        tags: record.tags.clone(),
        body_html: body_html(&record.content),
    }
}

/// Escapes the body and turns newlines into `<br>`; no other markdown is
/// interpreted.
pub fn body_html(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\n', "<br>")
}
