use super::{invocation::CONFIG_EXTENSIONS, results::ResultsByFile};
use std::collections::BTreeSet;

pub type PropertyKeySet = BTreeSet<String>;

fn is_config_file(path: &str) -> bool {
    CONFIG_EXTENSIONS
        .iter()
        .any(|extension| path.ends_with(&format!(".{extension}")))
}

/// `key=value` first, then YAML style `key: value`.
fn key_of(line: &str) -> Option<&str> {
    let (key, _) = line.split_once('=').or_else(|| line.split_once(':'))?;
    Some(key.trim()).filter(|key| !key.is_empty())
}

/// Property keys defined on matched lines of configuration files.
pub fn extract(results: &ResultsByFile) -> PropertyKeySet {
    results
        .iter()
        .filter(|(path, _)| is_config_file(path))
        .flat_map(|(_, matches)| matches)
        .filter_map(|grep_match| key_of(&grep_match.text))
        .map(ToOwned::to_owned)
        .collect()
}
