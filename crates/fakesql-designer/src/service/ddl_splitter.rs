//! Splitting pasted DDL into per-table fragments

/// Token a pasted script is split on. Matched literally and case-sensitively.
pub const STATEMENT_DELIMITER: &str = "CREATE";

/// Splits a pasted script into one fragment per `CREATE` statement.
///
/// This is a textual heuristic, not a tokenizer: a `CREATE` inside a string
/// literal, identifier or comment starts a new fragment too.
pub struct DdlSplitter;

impl DdlSplitter {
    /// Split `script` into fragments, each starting with `CREATE `
    ///
    /// Fragments that are blank once the delimiter is removed are dropped, so
    /// empty or whitespace-only input yields no fragments.
    pub fn split(script: &str) -> Vec<String> {
        script
            .split(STATEMENT_DELIMITER)
            .filter(|fragment| !fragment.trim().is_empty())
            .map(|fragment| format!("{} {}", STATEMENT_DELIMITER, fragment.trim()))
            .collect()
    }
}
