use regex::Regex;
use std::sync::OnceLock;

use crate::model::{split_tags, PromptRecord};

fn block_regex() -> &'static Regex {
    static RE_BLOCK: OnceLock<Regex> = OnceLock::new();
    RE_BLOCK.get_or_init(|| Regex::new(r"^---([\s\S]*?)---").unwrap())
}

/// Parses a markdown file with an optional leading `---` block into a record.
///
/// Parsing is permissive: a missing or malformed block only means the
/// metadata fields stay empty, and the whole input becomes the content.
pub fn parse(text: &str, source_id: &str) -> PromptRecord {
    let mut record = PromptRecord {
        source_id: source_id.to_string(),
        ..PromptRecord::default()
    };

    let Some(caps) = block_regex().captures(text) else {
        record.content = text.trim().to_string();
        return record;
    };

    let block = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    for line in block.trim().lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "tags" => record.tags = parse_tag_list(value),
            "title" => record.title = strip_quotes(value).to_string(),
            "description" => record.description = strip_quotes(value).to_string(),
            _ => {}
        }
    }

    let block_end = caps.get(0).map(|m| m.end()).unwrap_or_default();
    record.content = text[block_end..].trim().to_string();
    record
}

fn parse_tag_list(value: &str) -> Vec<String> {
    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '"'))
        .collect();
    split_tags(&cleaned)
}

fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['\'', '"']).unwrap_or(value);
    value.strip_suffix(['\'', '"']).unwrap_or(value)
}
