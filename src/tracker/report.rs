use super::{property_keys::PropertyKeySet, results::ResultsByFile, Target};
use itertools::Itertools;
use std::fmt::{self, Display, Formatter, Write};

/// Only the first few HTTP client matches of each file are shown.
pub const HTTP_MATCHES_PER_FILE: usize = 3;

const RULE_WIDTH: usize = 60;

/// Everything found for one migration target.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub target: Target,
    pub direct: ResultsByFile,
    pub property_keys: PropertyKeySet,
    /// Property-reference results per key, in key order.
    pub property_usages: Vec<(String, ResultsByFile)>,
    pub http_calls: ResultsByFile,
    /// Variable-trace results per requested name.
    pub variable_usages: Vec<(String, ResultsByFile)>,
}

/// Writes one block per file: a file line followed by its matches.
fn write_files(
    out: &mut impl Write,
    results: &ResultsByFile,
    indent: usize,
    limit: Option<usize>,
) -> fmt::Result {
    let pad = " ".repeat(indent);
    for (path, matches) in results.iter() {
        writeln!(out, "{pad}  📁 {path}")?;
        for grep_match in matches.iter().take(limit.unwrap_or(usize::MAX)) {
            writeln!(
                out,
                "{pad}    Line {}: {}",
                grep_match.line_number,
                grep_match.text.trim()
            )?;
        }
    }
    Ok(())
}

/// A titled section listing the files of one phase.
pub fn render_section(title: &str, results: &ResultsByFile, limit: Option<usize>) -> String {
    let mut out = format!("{title}:\n");
    // writing into a String cannot fail
    let _ = write_files(&mut out, results, 0, limit);
    out
}

impl Display for MigrationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        write!(f, "\n{rule}\nMigration Report for: {}\n{rule}\n\n", self.target)?;

        f.write_str(&render_section("1. DIRECT REFERENCES", &self.direct, None))?;

        if !self.property_keys.is_empty() {
            writeln!(
                f,
                "\n2. PROPERTY KEYS FOUND: {}\n",
                self.property_keys.iter().join(", ")
            )?;
            for (key, usages) in &self.property_usages {
                writeln!(f, "  Property '{key}' used in:")?;
                write_files(f, usages, 2, None)?;
            }
        }

        f.write_str("\n")?;
        f.write_str(&render_section(
            "3. HTTP CLIENT USAGE PATTERNS",
            &self.http_calls,
            Some(HTTP_MATCHES_PER_FILE),
        ))?;

        if !self.variable_usages.is_empty() {
            f.write_str("\n4. VARIABLE USAGE:\n")?;
            for (variable, usages) in &self.variable_usages {
                writeln!(f, "  Variable '{variable}' used in:")?;
                write_files(f, usages, 2, None)?;
            }
        }

        Ok(())
    }
}
