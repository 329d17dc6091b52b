//! Browser implementations of the store, fetch, clipboard and document seams.

use std::time::Duration;

use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, RequestInit, Response, Storage};

use crate::error::{GalleryError, Result};
use crate::repository::PromptSource;
use crate::store::KeyValueStore;
use crate::theme::Theme;

fn js_reason(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `window.localStorage`. Without one, reads are empty and writes fail.
#[derive(Clone)]
pub struct BrowserStore {
    storage: Option<Storage>,
}

impl BrowserStore {
    pub fn open() -> Self {
        let storage = window().local_storage().ok().flatten();
        if storage.is_none() {
            log::warn!("local storage unavailable, prompts and theme will not be saved");
        }
        Self { storage }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage.get_item(key).map_err(|e| GalleryError::Store {
            key: key.to_string(),
            reason: js_reason(&e),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let Some(storage) = &self.storage else {
            return Err(GalleryError::Store {
                key: key.to_string(),
                reason: "local storage unavailable".to_string(),
            });
        };
        storage.set_item(key, value).map_err(|e| GalleryError::Store {
            key: key.to_string(),
            reason: js_reason(&e),
        })
    }
}

/// `fetch` relative to the page, aborted after `timeout_ms`.
pub struct FetchSource {
    timeout_ms: u32,
}

impl FetchSource {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl PromptSource for FetchSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let fetch_error = |e: JsValue| GalleryError::Fetch {
            path: path.to_string(),
            reason: js_reason(&e),
        };

        let controller = AbortController::new().map_err(fetch_error)?;
        let init = RequestInit::new();
        init.set_signal(Some(&controller.signal()));

        let abort = controller.clone();
        let timer = set_timeout_with_handle(
            move || abort.abort(),
            Duration::from_millis(self.timeout_ms.into()),
        )
        .ok();

        let outcome = read_text(path, &init).await;
        if let Some(timer) = timer {
            timer.clear();
        }

        match outcome {
            Err(_) if controller.signal().aborted() => Err(GalleryError::Timeout {
                path: path.to_string(),
                after_ms: self.timeout_ms,
            }),
            other => other,
        }
    }
}

async fn read_text(path: &str, init: &RequestInit) -> Result<String> {
    let fetch_error = |e: JsValue| GalleryError::Fetch {
        path: path.to_string(),
        reason: js_reason(&e),
    };

    let value = JsFuture::from(window().fetch_with_str_and_init(path, init))
        .await
        .map_err(fetch_error)?;
    let response: Response = value.dyn_into().map_err(fetch_error)?;
    if !response.ok() {
        return Err(GalleryError::Status {
            path: path.to_string(),
            status: response.status(),
        });
    }
    let body = JsFuture::from(response.text().map_err(fetch_error)?)
        .await
        .map_err(fetch_error)?;
    body.as_string().ok_or_else(|| GalleryError::Fetch {
        path: path.to_string(),
        reason: "response body is not text".to_string(),
    })
}

pub async fn write_clipboard(content: &str) -> Result<()> {
    let clipboard = window().navigator().clipboard();
    JsFuture::from(clipboard.write_text(content))
        .await
        .map(|_| ())
        .map_err(|e| GalleryError::Clipboard(js_reason(&e)))
}

/// Leaves exactly one of `light-mode`/`dark-mode` on the root element.
pub fn apply_theme(theme: Theme) {
    let Some(root) = document().document_element() else {
        return;
    };
    let classes = root.class_list();
    if let Err(err) = classes.remove_1(theme.opposite_class()) {
        log::warn!("removing {} failed: {}", theme.opposite_class(), js_reason(&err));
    }
    if let Err(err) = classes.add_1(theme.class()) {
        log::warn!("applying {} theme failed: {}", theme.as_str(), js_reason(&err));
    }
}

pub fn set_document_lang(code: &str) {
    if let Some(root) = document().document_element() {
        if let Err(err) = root.set_attribute("lang", code) {
            log::warn!("setting document lang to {code} failed: {}", js_reason(&err));
        }
    }
}

pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}
