use std::collections::{BTreeSet, HashSet};

use crate::config::PROMPTS_KEY;
use crate::error::{GalleryError, Result};
use crate::frontmatter;
use crate::model::{split_tags, PromptDraft, PromptRecord};
use crate::store::KeyValueStore;

/// Where bundled prompt files come from. In the browser this is `fetch`.
#[allow(async_fn_in_trait)]
pub trait PromptSource {
    async fn fetch_text(&self, path: &str) -> Result<String>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptRepository {
    records: Vec<PromptRecord>,
}

impl PromptRepository {
    /// Builds the collection from stored records followed by every known
    /// path that could be fetched. Paths are fetched one after another and a
    /// failing path never stops the rest.
    pub async fn load(
        known_paths: &[String],
        store: &impl KeyValueStore,
        source: &impl PromptSource,
    ) -> Self {
        let mut repo = Self::from_store(store);
        for path in known_paths {
            match source.fetch_text(path).await {
                Ok(text) => {
                    let record = frontmatter::parse(&text, path);
                    if repo.contains(&record.source_id) {
                        log::debug!("keeping stored prompt over {path}");
                        continue;
                    }
                    repo.records.push(record);
                }
                Err(err) => log::warn!("skipping prompt: {err}"),
            }
        }
        log::info!("loaded {} prompts", repo.len());
        repo
    }

    /// Reads persisted records. Corrupt data reads as an empty collection.
    pub fn from_store(store: &impl KeyValueStore) -> Self {
        let raw = match store.get(PROMPTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(err) => {
                log::warn!("reading stored prompts failed: {err}");
                return Self::default();
            }
        };
        let stored: Vec<PromptRecord> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(err) => {
                log::warn!("discarding unreadable stored prompts: {err}");
                return Self::default();
            }
        };

        let mut seen = HashSet::new();
        let records = stored
            .into_iter()
            .filter(|record| seen.insert(record.source_id.clone()))
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[PromptRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, source_id: &str) -> Option<&PromptRecord> {
        self.records.iter().find(|r| r.source_id == source_id)
    }

    pub fn contains(&self, source_id: &str) -> bool {
        self.get(source_id).is_some()
    }

    /// Every tag in use, deduplicated and sorted.
    pub fn all_tags(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|r| r.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a PromptRecord> + 'a {
        self.records.iter().filter(move |r| r.has_tag(tag))
    }

    /// Adds a record and writes the whole collection back to the store. The
    /// in-memory collection is left untouched when the write fails.
    pub fn append(&mut self, record: PromptRecord, store: &mut impl KeyValueStore) -> Result<()> {
        if self.contains(&record.source_id) {
            return Err(GalleryError::DuplicateId(record.source_id));
        }
        let mut next = self.records.clone();
        next.push(record);
        let json = serde_json::to_string(&next)?;
        store.set(PROMPTS_KEY, &json)?;
        self.records = next;
        Ok(())
    }

    /// Appends every record of `other` whose id is not present yet.
    pub fn merge_missing(&mut self, other: &PromptRepository) {
        for record in &other.records {
            if !self.contains(&record.source_id) {
                self.records.push(record.clone());
            }
        }
    }

    /// Builds a record from form input under a fresh local id.
    pub fn record_from_draft(&self, draft: PromptDraft, now_ms: u64) -> Result<PromptRecord> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(GalleryError::InvalidDraft("title is empty"));
        }
        Ok(PromptRecord {
            source_id: self.next_local_id(now_ms),
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            content: draft.content,
            tags: split_tags(&draft.tags_input),
        })
    }

    /// `local/<millis>.md`, bumped until it collides with nothing.
    pub fn next_local_id(&self, now_ms: u64) -> String {
        let mut stamp = now_ms;
        loop {
            let id = format!("local/{stamp}.md");
            if !self.contains(&id) {
                return id;
            }
            stamp += 1;
        }
    }
}
