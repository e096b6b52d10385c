use super::grep_match::GrepMatch;
use indexmap::IndexMap;

/// Matches of one phase grouped by file. Files keep the order in which they
/// were first reported and matches keep arrival order, duplicates included.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ResultsByFile(IndexMap<String, Vec<GrepMatch>>);

impl ResultsByFile {
    pub fn add_matches(&mut self, matches: impl IntoIterator<Item = GrepMatch>) {
        for grep_match in matches {
            self.0
                .entry(grep_match.path.clone())
                .or_default()
                .push(grep_match);
        }
    }

    #[cfg(test)]
    pub fn get(&self, path: &str) -> Option<&[GrepMatch]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GrepMatch])> {
        self.0
            .iter()
            .map(|(path, matches)| (path.as_str(), matches.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn number_of_files(&self) -> usize {
        self.0.len()
    }

    pub fn number_of_matches(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}
