//! Presence check for keys the application cannot start without.

/// Values starting with this prefix are unfilled template placeholders.
const PLACEHOLDER_PREFIX: &str = "your_";

/// Required keys that are absent, empty, or still a placeholder in `content`.
pub fn missing_keys(content: &str, required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|key| !is_set(content, key))
        .cloned()
        .collect()
}

/// Groups of which not a single key is set in `content`.
///
/// Any one key of a group is enough, e.g. one of several speech-to-text providers.
pub fn missing_groups(content: &str, groups: &[Vec<String>]) -> Vec<Vec<String>> {
    groups
        .iter()
        .filter(|group| !group.is_empty() && !group.iter().any(|key| is_set(content, key)))
        .cloned()
        .collect()
}

fn is_set(content: &str, key: &str) -> bool {
    matches!(lookup(content, key), Some(v) if !v.is_empty() && !v.starts_with(PLACEHOLDER_PREFIX))
}

fn lookup<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content.lines().find_map(|line| {
        let (k, v) = line.split_once('=')?;
        (k.trim() == key).then(|| v.trim().trim_matches('"'))
    })
}
