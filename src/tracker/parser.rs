use super::grep_match::GrepMatch;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

/// `{"text": "..."}` or `{"bytes": "<base64>"}` for data that is not UTF-8.
#[derive(Deserialize, Debug)]
struct Data {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct MatchData {
    path: Option<Data>,
    lines: Option<Data>,
    line_number: Option<u64>,
}

impl MatchData {
    fn into_match(self, pattern: &str) -> Option<GrepMatch> {
        Some(GrepMatch::new(
            self.path?.text?,
            self.line_number?,
            self.lines?.text?,
            pattern.into(),
        ))
    }
}

/// Parses one line of `--json` output. Anything other than a complete
/// `match` record yields `None`.
fn parse_line(line: &str, pattern: &str) -> Option<GrepMatch> {
    let record: Value = match serde_json::from_str(line) {
        Ok(record) => record,
        Err(error) => {
            trace!(%error, line, "skipping malformed output line");
            return None;
        }
    };

    if record.get("type").and_then(Value::as_str) != Some("match") {
        return None;
    }

    MatchData::deserialize(record.get("data")?)
        .ok()
        .and_then(|data| data.into_match(pattern))
}

/// Collects the matches of a whole `--json` stream, tagging each with `pattern`.
pub fn parse_json_stream(stdout: &str, pattern: &str) -> Vec<GrepMatch> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| parse_line(line, pattern))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use test_case::test_case;

    lazy_static! {
        static ref STREAM: String = [
            r#"{"type":"begin","data":{"path":{"text":"src/Client.java"}}}"#,
            r#"{"type":"context","data":{"path":{"text":"src/Client.java"},"lines":{"text":"class Client {\n"},"line_number":9,"absolute_offset":120,"submatches":[]}}"#,
            r#"{"type":"match","data":{"path":{"text":"src/Client.java"},"lines":{"text":"  String url = \"https://api.example.com/v1/users\";\n"},"line_number":10,"absolute_offset":135,"submatches":[{"match":{"text":"https://api.example.com/v1/users"},"start":16,"end":48}]}}"#,
            "rg: ./secret: Permission denied (os error 13)",
            r#"{"type":"match","data":{"path":{"text":"conf/app.properties"},"lines":{"text":"users.url=https://api.example.com/v1/users\n"},"line_number":3,"absolute_offset":40,"submatches":[]}}"#,
            "",
            r#"{"type":"end","data":{"path":{"text":"src/Client.java"},"binary_offset":null,"stats":{"matches":1}}}"#,
            r#"{"type":"summary","data":{"elapsed_total":{"secs":0,"nanos":1,"human":"0.0s"},"stats":{"matches":2}}}"#,
        ]
        .join("\n");
    }

    #[test]
    fn only_match_records_are_kept() {
        let matches = parse_json_stream(&STREAM, "users");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].path, "src/Client.java");
        assert_eq!(matches[0].line_number, 10);
        assert_eq!(
            matches[0].text,
            "  String url = \"https://api.example.com/v1/users\";\n"
        );
        assert_eq!(matches[1].path, "conf/app.properties");
        assert_eq!(matches[1].line_number, 3);
        assert!(matches.iter().all(|m| m.pattern == "users"));
    }

    #[test]
    fn garbage_lines_do_not_hide_matches() {
        let noisy = STREAM
            .lines()
            .flat_map(|line| [line, "{not json", "]]]"])
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(parse_json_stream(&noisy, "users").len(), 2);
    }

    #[test]
    fn empty_stream_has_no_matches() {
        assert!(parse_json_stream("", "x").is_empty());
    }

    #[test_case(r#"{"type":"match"}"#; "no data")]
    #[test_case(r#"{"type":"match","data":{"lines":{"text":"a"},"line_number":1}}"#; "no path")]
    #[test_case(r#"{"type":"match","data":{"path":{"text":"a"},"lines":{"text":"a"}}}"#; "no line number")]
    #[test_case(r#"{"type":"match","data":{"path":{"bytes":"/w=="},"lines":{"text":"a"},"line_number":1}}"#; "non utf8 path")]
    #[test_case(r#"{"type":"match","data":{"path":{"text":"a"},"lines":{"text":"a"},"line_number":"one"}}"#; "wrong line number type")]
    #[test_case(r#"{"type":"match","data":null}"#; "null data")]
    #[test_case(r#"{"type":"match","data":{"path":"a","lines":{"text":"a"},"line_number":1}}"#; "path not an object")]
    #[test_case(r#"["match"]"#; "not an object")]
    fn incomplete_records_are_skipped(line: &str) {
        assert!(parse_json_stream(line, "x").is_empty());
    }
}
