use serde::{Deserialize, Serialize};

/// One entry of the gallery, either fetched from a bundled markdown file or
/// created through the form.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PromptRecord {
    #[serde(rename = "filePath")]
    pub source_id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl PromptRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Raw values read from the create form before they become a record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptDraft {
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags_input: String,
}

/// Splits a comma-separated tag field into trimmed, non-empty tags.
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
