/// One hit reported by the search tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrepMatch {
    pub path: String,
    pub line_number: u64,
    pub text: String,
    /// Search pattern of the invocation that produced this hit.
    pub pattern: String,
}

impl GrepMatch {
    pub fn new(path: String, line_number: u64, text: String, pattern: String) -> Self {
        Self {
            path,
            line_number,
            text,
            pattern,
        }
    }
}
