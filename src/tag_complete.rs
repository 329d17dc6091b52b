/// Completes the last comma-separated token of `input` from `known_tags`.
///
/// Returns the rewritten field value, or `None` when no known tag starts with
/// the token being typed.
pub fn complete(input: &str, known_tags: &[String]) -> Option<String> {
    let mut tokens: Vec<&str> = input.split(',').map(str::trim).collect();
    let current = tokens.last().copied().unwrap_or_default();
    let suggestion = known_tags.iter().find(|tag| tag.starts_with(current))?;
    if let Some(last) = tokens.last_mut() {
        *last = suggestion.as_str();
    }
    Some(format!("{}, ", tokens.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn completes_last_token() {
        let known = tags(&["coding", "review", "writing"]);
        assert_eq!(complete("writing, rev", &known).as_deref(), Some("writing, review, "));
        assert_eq!(complete("co", &known).as_deref(), Some("coding, "));
    }

    #[test]
    fn leaves_unknown_prefix_alone() {
        let known = tags(&["coding"]);
        assert_eq!(complete("zzz", &known), None);
        assert_eq!(complete("", &[]), None);
    }

    #[test]
    fn empty_token_takes_first_known_tag() {
        let known = tags(&["alpha", "beta"]);
        assert_eq!(complete("beta, ", &known).as_deref(), Some("beta, alpha, "));
    }
}
