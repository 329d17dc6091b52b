use serde::{Deserialize, Serialize};

use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::i18n::Locale;
use crate::model::PromptDraft;
use crate::repository::PromptRepository;
use crate::store::KeyValueStore;
use crate::theme::{self, Theme};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Home,
    TagFilter {
        tag: String,
    },
    Detail {
        source_id: String,
        return_to: ReturnTo,
    },
    CreateForm,
}

/// The list a detail view goes back to.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ReturnTo {
    #[default]
    Home,
    TagFilter {
        tag: String,
    },
}

impl From<ReturnTo> for ViewState {
    fn from(target: ReturnTo) -> Self {
        match target {
            ReturnTo::Home => ViewState::Home,
            ReturnTo::TagFilter { tag } => ViewState::TagFilter { tag },
        }
    }
}

impl ViewState {
    /// Structural parent used by "back". Home is its own parent.
    pub fn parent(&self) -> ViewState {
        match self {
            ViewState::Detail { return_to, .. } => return_to.clone().into(),
            _ => ViewState::Home,
        }
    }

    fn as_return_target(&self) -> ReturnTo {
        match self {
            ViewState::TagFilter { tag } => ReturnTo::TagFilter { tag: tag.clone() },
            _ => ReturnTo::Home,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    OpenRecord(String),
    OpenTag(String),
    NewPrompt,
    Back,
    Cancel,
    Submit { draft: PromptDraft, now_ms: u64 },
    ToggleLocale,
    ToggleTheme,
    Copy,
    CopyFinished { ticket: u64, ok: bool },
    CopyReset(u64),
}

/// Effects the host has to carry out after a dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    WriteClipboard { ticket: u64, content: String },
    ScheduleCopyReset { ticket: u64, after_ms: u32 },
    ApplyTheme(Theme),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Transient state of the detail view's copy button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyFeedback {
    #[default]
    Idle,
    Pending(u64),
    Shown { ticket: u64, outcome: CopyOutcome },
}

/// Application context: everything a render needs, owned in one place.
pub struct Gallery<S> {
    store: S,
    config: GalleryConfig,
    repo: PromptRepository,
    state: ViewState,
    locale: Locale,
    theme: Theme,
    copy: CopyFeedback,
    next_ticket: u64,
    loaded: bool,
}

impl<S: KeyValueStore> Gallery<S> {
    /// Starts on Home with whatever the store already holds; fetched prompts
    /// arrive later through [`Gallery::finish_loading`].
    pub fn new(store: S, config: GalleryConfig) -> Self {
        let repo = PromptRepository::from_store(&store);
        let theme = theme::load(&store);
        Self {
            locale: config.default_locale,
            store,
            config,
            repo,
            state: ViewState::Home,
            theme,
            copy: CopyFeedback::Idle,
            next_ticket: 0,
            loaded: false,
        }
    }

    pub fn startup_commands(&self) -> Vec<Command> {
        vec![Command::ApplyTheme(self.theme)]
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn repository(&self) -> &PromptRepository {
        &self.repo
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn copy_feedback(&self) -> CopyFeedback {
        self.copy
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replaces the startup defaults once `gallery.json` has been read. A
    /// locale the user already switched away from the default is kept.
    pub fn apply_config(&mut self, config: GalleryConfig) {
        if self.locale == self.config.default_locale {
            self.locale = config.default_locale;
        }
        self.config = config;
    }

    /// Installs the fully loaded repository, keeping any record created in
    /// the meantime.
    pub fn finish_loading(&mut self, mut loaded: PromptRepository) {
        loaded.merge_missing(&self.repo);
        self.repo = loaded;
        self.loaded = true;
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Command> {
        log::debug!("dispatch {action:?} in {:?}", self.state);
        match action {
            Action::OpenRecord(source_id) => {
                match self.open_record(source_id) {
                    Ok(next) => self.navigate(next),
                    Err(err) => {
                        log::warn!("{err}, returning home");
                        self.navigate(ViewState::Home);
                    }
                }
                Vec::new()
            }
            Action::OpenTag(tag) => {
                self.navigate(ViewState::TagFilter { tag });
                Vec::new()
            }
            Action::NewPrompt => {
                self.navigate(ViewState::CreateForm);
                Vec::new()
            }
            Action::Back => {
                let parent = self.state.parent();
                self.navigate(parent);
                Vec::new()
            }
            Action::Cancel => {
                if self.state == ViewState::CreateForm {
                    self.navigate(ViewState::Home);
                }
                Vec::new()
            }
            Action::Submit { draft, now_ms } => {
                if self.state != ViewState::CreateForm {
                    return Vec::new();
                }
                match self.submit(draft, now_ms) {
                    Ok(()) => self.navigate(ViewState::Home),
                    Err(err) => log::warn!("prompt not saved: {err}"),
                }
                Vec::new()
            }
            Action::ToggleLocale => {
                self.locale = self.locale.toggled();
                Vec::new()
            }
            Action::ToggleTheme => match theme::toggle(&mut self.store) {
                Ok(next) => {
                    self.theme = next;
                    vec![Command::ApplyTheme(next)]
                }
                Err(err) => {
                    log::warn!("theme not saved: {err}");
                    Vec::new()
                }
            },
            Action::Copy => {
                let ViewState::Detail { source_id, .. } = &self.state else {
                    return Vec::new();
                };
                let Some(record) = self.repo.get(source_id) else {
                    return Vec::new();
                };
                let content = record.content.clone();
                let ticket = self.issue_ticket();
                self.copy = CopyFeedback::Pending(ticket);
                vec![Command::WriteClipboard { ticket, content }]
            }
            Action::CopyFinished { ticket, ok } => {
                if self.copy != CopyFeedback::Pending(ticket) {
                    return Vec::new();
                }
                let outcome = if ok {
                    CopyOutcome::Copied
                } else {
                    CopyOutcome::Failed
                };
                self.copy = CopyFeedback::Shown { ticket, outcome };
                vec![Command::ScheduleCopyReset {
                    ticket,
                    after_ms: self.config.copy_feedback_ms,
                }]
            }
            Action::CopyReset(ticket) => {
                if matches!(self.copy, CopyFeedback::Shown { ticket: shown, .. } if shown == ticket) {
                    self.copy = CopyFeedback::Idle;
                }
                Vec::new()
            }
        }
    }

    fn open_record(&self, source_id: String) -> Result<ViewState> {
        if !self.repo.contains(&source_id) {
            return Err(GalleryError::UnknownRecord(source_id));
        }
        Ok(ViewState::Detail {
            source_id,
            return_to: self.state.as_return_target(),
        })
    }

    fn submit(&mut self, draft: PromptDraft, now_ms: u64) -> Result<()> {
        let record = self.repo.record_from_draft(draft, now_ms)?;
        log::info!("saving prompt {}", record.source_id);
        self.repo.append(record, &mut self.store)
    }

    fn navigate(&mut self, next: ViewState) {
        self.copy = CopyFeedback::Idle;
        self.state = next;
    }

    fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }
}

#[cfg(test)]
impl<S> Gallery<S> {
    /// Puts the controller into a state no action sequence reaches.
    pub(crate) fn force_state(&mut self, state: ViewState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PROMPTS_KEY;
    use crate::model::PromptRecord;
    use crate::store::MemoryStore;

    fn record(id: &str, tags: &[&str]) -> PromptRecord {
        PromptRecord {
            source_id: id.to_string(),
            title: id.to_string(),
            content: format!("body of {id}"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..PromptRecord::default()
        }
    }

    fn gallery() -> Gallery<MemoryStore> {
        let stored = vec![record("a.md", &["x"]), record("b.md", &["y"])];
        let store = MemoryStore::with(PROMPTS_KEY, &serde_json::to_string(&stored).unwrap());
        Gallery::new(store, GalleryConfig::default())
    }

    fn open_detail(g: &mut Gallery<MemoryStore>, id: &str) {
        g.dispatch(Action::OpenRecord(id.to_string()));
    }

    #[test]
    fn starts_home_with_stored_records() {
        let g = gallery();
        assert_eq!(g.state(), &ViewState::Home);
        assert_eq!(g.repository().len(), 2);
        assert!(!g.is_loaded());
        assert_eq!(g.startup_commands(), vec![Command::ApplyTheme(Theme::Light)]);
    }

    #[test]
    fn detail_returns_to_its_entry_context() {
        let mut g = gallery();
        open_detail(&mut g, "a.md");
        assert_eq!(
            g.state(),
            &ViewState::Detail {
                source_id: "a.md".to_string(),
                return_to: ReturnTo::Home
            }
        );
        g.dispatch(Action::Back);
        assert_eq!(g.state(), &ViewState::Home);

        g.dispatch(Action::OpenTag("x".to_string()));
        open_detail(&mut g, "a.md");
        g.dispatch(Action::Back);
        assert_eq!(g.state(), &ViewState::TagFilter { tag: "x".to_string() });
        g.dispatch(Action::Back);
        assert_eq!(g.state(), &ViewState::Home);
    }

    #[test]
    fn unknown_record_falls_back_home() {
        let mut g = gallery();
        g.dispatch(Action::OpenTag("x".to_string()));
        open_detail(&mut g, "missing.md");
        assert_eq!(g.state(), &ViewState::Home);
    }

    #[test]
    fn tag_without_matches_is_allowed() {
        let mut g = gallery();
        g.dispatch(Action::OpenTag("nothing".to_string()));
        assert_eq!(g.state(), &ViewState::TagFilter { tag: "nothing".to_string() });
    }

    #[test]
    fn locale_switch_keeps_state() {
        let mut g = gallery();
        g.dispatch(Action::OpenTag("y".to_string()));
        open_detail(&mut g, "b.md");
        let before = g.state().clone();
        g.dispatch(Action::ToggleLocale);
        assert_eq!(g.locale(), Locale::De);
        assert_eq!(g.state(), &before);
    }

    #[test]
    fn late_config_applies_locale_and_copy_window() {
        let mut g = gallery();
        g.dispatch(Action::OpenTag("x".to_string()));
        g.apply_config(GalleryConfig {
            default_locale: Locale::De,
            copy_feedback_ms: 500,
            ..GalleryConfig::default()
        });
        assert_eq!(g.locale(), Locale::De);
        assert_eq!(g.state(), &ViewState::TagFilter { tag: "x".to_string() });

        open_detail(&mut g, "a.md");
        g.dispatch(Action::Copy);
        let commands = g.dispatch(Action::CopyFinished { ticket: 1, ok: true });
        assert_eq!(
            commands,
            vec![Command::ScheduleCopyReset {
                ticket: 1,
                after_ms: 500
            }]
        );
    }

    #[test]
    fn late_config_keeps_a_locale_already_chosen() {
        let mut g = gallery();
        g.dispatch(Action::ToggleLocale);
        g.apply_config(GalleryConfig::default());
        assert_eq!(g.locale(), Locale::De);
    }

    #[test]
    fn submit_appends_persists_and_goes_home() {
        let mut g = gallery();
        g.dispatch(Action::NewPrompt);
        assert_eq!(g.state(), &ViewState::CreateForm);

        let draft = PromptDraft {
            title: "T".to_string(),
            description: "D".to_string(),
            content: "C".to_string(),
            tags_input: "a, b".to_string(),
        };
        g.dispatch(Action::Submit { draft, now_ms: 42 });

        assert_eq!(g.state(), &ViewState::Home);
        let created = g.repository().get("local/42.md").unwrap();
        assert_eq!(created.tags, vec!["a", "b"]);
        let persisted: Vec<PromptRecord> =
            serde_json::from_str(&g.store().values[PROMPTS_KEY]).unwrap();
        assert_eq!(persisted.len(), 3);
    }

    #[test]
    fn invalid_submit_stays_on_form() {
        let mut g = gallery();
        g.dispatch(Action::NewPrompt);
        g.dispatch(Action::Submit {
            draft: PromptDraft::default(),
            now_ms: 1,
        });
        assert_eq!(g.state(), &ViewState::CreateForm);
        assert_eq!(g.repository().len(), 2);
        g.dispatch(Action::Cancel);
        assert_eq!(g.state(), &ViewState::Home);
    }

    #[test]
    fn copy_feedback_resets_after_timer() {
        let mut g = gallery();
        open_detail(&mut g, "a.md");

        let commands = g.dispatch(Action::Copy);
        assert_eq!(
            commands,
            vec![Command::WriteClipboard {
                ticket: 1,
                content: "body of a.md".to_string()
            }]
        );
        let commands = g.dispatch(Action::CopyFinished { ticket: 1, ok: true });
        assert_eq!(
            commands,
            vec![Command::ScheduleCopyReset {
                ticket: 1,
                after_ms: 2_000
            }]
        );
        assert_eq!(
            g.copy_feedback(),
            CopyFeedback::Shown {
                ticket: 1,
                outcome: CopyOutcome::Copied
            }
        );
        g.dispatch(Action::CopyReset(1));
        assert_eq!(g.copy_feedback(), CopyFeedback::Idle);
    }

    #[test]
    fn navigation_discards_pending_copy_timer() {
        let mut g = gallery();
        open_detail(&mut g, "a.md");
        g.dispatch(Action::Copy);
        g.dispatch(Action::CopyFinished { ticket: 1, ok: true });
        g.dispatch(Action::Back);
        open_detail(&mut g, "a.md");
        g.dispatch(Action::Copy);

        // The first timer fires late and must not touch the second copy.
        g.dispatch(Action::CopyReset(1));
        assert_eq!(g.copy_feedback(), CopyFeedback::Pending(2));

        g.dispatch(Action::Back);
        assert!(g.dispatch(Action::CopyFinished { ticket: 2, ok: true }).is_empty());
        assert_eq!(g.copy_feedback(), CopyFeedback::Idle);
    }

    #[test]
    fn failed_copy_is_surfaced() {
        let mut g = gallery();
        open_detail(&mut g, "b.md");
        g.dispatch(Action::Copy);
        g.dispatch(Action::CopyFinished { ticket: 1, ok: false });
        assert!(matches!(
            g.copy_feedback(),
            CopyFeedback::Shown {
                outcome: CopyOutcome::Failed,
                ..
            }
        ));
    }

    #[test]
    fn theme_toggle_emits_apply_command() {
        let mut g = gallery();
        assert_eq!(g.dispatch(Action::ToggleTheme), vec![Command::ApplyTheme(Theme::Dark)]);
        assert_eq!(g.dispatch(Action::ToggleTheme), vec![Command::ApplyTheme(Theme::Light)]);
        assert_eq!(g.store().values["theme"], "light");
    }

    #[test]
    fn loading_keeps_records_created_meanwhile() {
        let mut g = gallery();
        g.dispatch(Action::NewPrompt);
        g.dispatch(Action::Submit {
            draft: PromptDraft {
                title: "early".to_string(),
                ..PromptDraft::default()
            },
            now_ms: 7,
        });

        let loaded = PromptRepository::from_store(&MemoryStore::with(
            PROMPTS_KEY,
            &serde_json::to_string(&vec![record("a.md", &["x"]), record("b.md", &["y"])]).unwrap(),
        ));
        g.finish_loading(loaded);

        assert!(g.is_loaded());
        assert!(g.repository().contains("local/7.md"));
        assert_eq!(g.repository().len(), 3);
    }

    #[test]
    fn view_state_serializes() {
        let state = ViewState::Detail {
            source_id: "a.md".to_string(),
            return_to: ReturnTo::TagFilter { tag: "x".to_string() },
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<ViewState>(&json).unwrap(), state);
    }
}
