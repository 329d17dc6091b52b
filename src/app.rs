use std::time::Duration;

use leptos::ev::{KeyboardEvent, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser::{self, BrowserStore, FetchSource};
use crate::config::{self, GalleryConfig};
use crate::logging;
use crate::model::PromptDraft;
use crate::render::{render, Body, Button, Card, Chip, DetailView, FormView, ListView};
use crate::repository::PromptRepository;
use crate::tag_complete;
use crate::view_state::{Action, Command, Gallery, ViewState};

type GallerySignal = RwSignal<Gallery<BrowserStore>, LocalStorage>;

fn dispatch(gallery: GallerySignal, action: Action) {
    let commands = gallery.try_update(|g| g.dispatch(action)).unwrap_or_default();
    run_commands(gallery, commands);
}

fn run_commands(gallery: GallerySignal, commands: Vec<Command>) {
    for command in commands {
        match command {
            Command::ApplyTheme(theme) => browser::apply_theme(theme),
            Command::WriteClipboard { ticket, content } => spawn_local(async move {
                let ok = match browser::write_clipboard(&content).await {
                    Ok(()) => true,
                    Err(err) => {
                        log::warn!("{err}");
                        false
                    }
                };
                dispatch(gallery, Action::CopyFinished { ticket, ok });
            }),
            Command::ScheduleCopyReset { ticket, after_ms } => {
                set_timeout(
                    move || dispatch(gallery, Action::CopyReset(ticket)),
                    Duration::from_millis(after_ms.into()),
                );
            }
        }
    }
}

fn action_button(button: Button, on_action: Callback<Action>) -> impl IntoView {
    let Button { label, action } = button;
    view! {
        <button type="button" on:click=move |_| on_action.run(action.clone())>
            {label}
        </button>
    }
}

fn tag_list(tags: Vec<String>) -> impl IntoView {
    view! {
        <div class="tags-container">
            {tags.into_iter().map(|tag| view! { <span class="tag">{tag}</span> }).collect::<Vec<_>>()}
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let defaults = GalleryConfig::default();
    let bootstrap_timeout_ms = defaults.fetch_timeout_ms;
    let gallery: GallerySignal = RwSignal::new_local(Gallery::new(BrowserStore::open(), defaults));
    let draft = RwSignal::new(PromptDraft::default());

    run_commands(gallery, gallery.with_untracked(|g| g.startup_commands()));

    // Home is already showing stored records while the config and the known
    // paths load.
    Effect::new(move |_| {
        spawn_local(async move {
            let config = config::load(&FetchSource::new(bootstrap_timeout_ms)).await;
            logging::set_level(config.log_level());
            let known_paths = config.known_paths.clone();
            let source = FetchSource::new(config.fetch_timeout_ms);
            gallery.update(|g| g.apply_config(config));

            let store = gallery.with_untracked(|g| g.store().clone());
            let repo = PromptRepository::load(&known_paths, &store, &source).await;
            gallery.update(|g| g.finish_loading(repo));
        });
    });

    let screen = Memo::new(move |_| gallery.with(|g| render(g)));

    Effect::new(move |_| screen.with(|s| browser::set_document_lang(s.chrome.lang)));

    let on_action = Callback::new(move |action: Action| {
        let leaves_form = matches!(action, Action::Submit { .. } | Action::Cancel);
        dispatch(gallery, action);
        if leaves_form && gallery.with_untracked(|g| *g.state() != ViewState::CreateForm) {
            draft.set(PromptDraft::default());
        }
    });

    let header = move || {
        let chrome = screen.get().chrome;
        view! {
            <h1 id="app-title">{chrome.app_title}</h1>
            <div class="header-actions">
                {action_button(chrome.new_prompt, on_action)}
                {action_button(chrome.lang_toggle, on_action)}
                {action_button(chrome.theme_toggle, on_action)}
            </div>
        }
    };

    let body = move || match screen.get().body {
        Body::List(list) => view! { <PromptList list=list on_action=on_action/> }.into_any(),
        Body::Detail(detail) => {
            view! { <PromptDetail detail=detail on_action=on_action/> }.into_any()
        }
        Body::Form(form) => {
            view! { <PromptForm form=form draft=draft on_action=on_action/> }.into_any()
        }
    };

    view! {
        <header class="app-header">{header}</header>
        <main id="app-container">{body}</main>
        <footer class="app-footer">
            <p id="footer-text">{move || screen.get().chrome.footer}</p>
        </footer>
    }
}

#[component]
fn PromptList(list: ListView, on_action: Callback<Action>) -> impl IntoView {
    let ListView {
        heading,
        back,
        chips,
        cards,
        placeholder,
    } = list;

    view! {
        <div class="list-header">
            {back.map(|button| action_button(button, on_action))}
            <h2>{heading}</h2>
        </div>
        <div class="tag-bar">
            {chips.into_iter().map(|chip| {
                let Chip { label, active, action } = chip;
                view! {
                    <span
                        class="tag chip"
                        class:active=active
                        on:click=move |_| on_action.run(action.clone())
                    >
                        {label}
                    </span>
                }
            }).collect::<Vec<_>>()}
        </div>
        {placeholder.map(|text| view! { <p class="placeholder">{text}</p> })}
        <div class="prompt-grid">
            {cards.into_iter().map(|card| prompt_card(card, on_action)).collect::<Vec<_>>()}
        </div>
    }
}

fn prompt_card(card: Card, on_action: Callback<Action>) -> impl IntoView {
    let Card {
        source_id,
        title,
        description,
        tags,
        action,
    } = card;

    view! {
        <div class="prompt-card" data-path=source_id on:click=move |_| on_action.run(action.clone())>
            <h3>{title}</h3>
            <p>{description}</p>
            {tag_list(tags)}
        </div>
    }
}

#[component]
fn PromptDetail(detail: DetailView, on_action: Callback<Action>) -> impl IntoView {
    let DetailView {
        back,
        copy,
        title,
        description,
        tags,
        body_html,
    } = detail;

    view! {
        <div class="prompt-detail-header">
            {action_button(back, on_action)}
            {action_button(copy, on_action)}
        </div>
        <div class="prompt-content">
            <h2>{title}</h2>
            <p class="prompt-description">{description}</p>
            {tag_list(tags)}
            <div class="prompt-body" inner_html=body_html></div>
        </div>
    }
}

#[component]
fn PromptForm(
    form: FormView,
    draft: RwSignal<PromptDraft>,
    on_action: Callback<Action>,
) -> impl IntoView {
    let FormView {
        heading,
        title_label,
        description_label,
        content_label,
        tags_label,
        save_label,
        cancel,
        known_tags,
    } = form;

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_action.run(Action::Submit {
            draft: draft.get_untracked(),
            now_ms: browser::now_ms(),
        });
    };

    // Tab completes the tag being typed instead of moving focus.
    let on_tags_keydown = move |ev: KeyboardEvent| {
        if ev.key() != "Tab" {
            return;
        }
        ev.prevent_default();
        let input = draft.with_untracked(|d| d.tags_input.clone());
        if let Some(completed) = tag_complete::complete(&input, &known_tags) {
            draft.update(|d| d.tags_input = completed);
        }
    };

    view! {
        <div class="prompt-form-container">
            <h2>{heading}</h2>
            <form id="new-prompt-form" on:submit=on_submit>
                <label for="prompt-title">{title_label}</label>
                <input
                    type="text"
                    id="prompt-title"
                    required
                    prop:value=move || draft.with(|d| d.title.clone())
                    on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                />

                <label for="prompt-description">{description_label}</label>
                <input
                    type="text"
                    id="prompt-description"
                    required
                    prop:value=move || draft.with(|d| d.description.clone())
                    on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                />

                <label for="prompt-content">{content_label}</label>
                <textarea
                    id="prompt-content"
                    rows="10"
                    required
                    prop:value=move || draft.with(|d| d.content.clone())
                    on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
                ></textarea>

                <label for="prompt-tags">{tags_label}</label>
                <input
                    type="text"
                    id="prompt-tags"
                    prop:value=move || draft.with(|d| d.tags_input.clone())
                    on:input=move |ev| draft.update(|d| d.tags_input = event_target_value(&ev))
                    on:keydown=on_tags_keydown
                />

                <div class="form-actions">
                    <button type="submit">{save_label}</button>
                    {action_button(cancel, on_action)}
                </div>
            </form>
        </div>
    }
}
