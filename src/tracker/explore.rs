use super::{
    invocation::{escape, InvocationBuilder, OutputMode},
    patterns::HTTP_CLIENT_TYPES,
    runner::Runner,
    Target, Tracker,
};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::warn;

const CONTEXT_BEFORE: i32 = 2;
const CONTEXT_AFTER: i32 = 3;

impl<R: Runner> Tracker<R> {
    /// Plain text search for `pattern`, or an empty string if it failed.
    fn plain_search(&self, pattern: String, file_types: &[&str]) -> crate::error::Result<String> {
        let invocation = self.build(
            InvocationBuilder::new(pattern)
                .mode(OutputMode::Plain)
                .context(CONTEXT_BEFORE, CONTEXT_AFTER)
                .file_types(file_types.iter().copied()),
        );

        match self.runner.run(&invocation) {
            Ok(raw) => Ok(raw.stdout),
            Err(error) if error.is_tool_unavailable() => Err(error),
            Err(error) => {
                warn!(command = %invocation, %error, "skipping failed search");
                Ok(String::new())
            }
        }
    }

    /// Prints raw search output for the target, its host and HTTP clients.
    pub(super) fn explore(&self, target: &Target, out: &mut impl Write) -> Result<()> {
        let rule = "=".repeat(60);
        writeln!(out, "\n{rule}\nSearching for: {target}\n{rule}")
            .context("failed to write banner")?;

        let direct = self.plain_search(escape(&target.value), &[])?;
        writeln!(out, "\n1. Direct URL references:\n{direct}")
            .context("failed to write direct references")?;

        let host = target.host();
        if !host.is_empty() {
            let domain = self.plain_search(escape(host), &[])?;
            writeln!(out, "\n2. Domain references ({host}):\n{domain}")
                .context("failed to write domain references")?;
        }

        let http = self.plain_search(HTTP_CLIENT_TYPES.into(), &["java", "py"])?;
        writeln!(out, "\n3. HTTP client usage:\n{http}")
            .context("failed to write HTTP client usage")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::TraceError,
        tracker::{
            runner::{MockRunner, RawOutput},
            Mode,
        },
    };
    use mockall::predicate::function;

    #[test]
    fn explore_prints_three_sections() {
        let mut runner = MockRunner::new();
        runner
            .expect_run()
            .with(function(|invocation: &crate::tracker::invocation::Invocation| {
                invocation.args().starts_with(&[
                    "--no-heading".to_string(),
                    "--line-number".to_string(),
                    "--color=never".to_string(),
                    "-B".to_string(),
                    "2".to_string(),
                    "-A".to_string(),
                    "3".to_string(),
                ])
            }))
            .times(3)
            .returning(|invocation| {
                Ok(RawOutput {
                    stdout: format!("hit.py:1:{}\n", invocation.pattern()),
                    ..Default::default()
                })
            });
        let tracker = Tracker::new(runner, "rg", ".");

        let mut out = Vec::new();
        tracker
            .run(
                Mode::Explore,
                &[Target::new("https://api.example.com/v1/users")],
                &[],
                &mut out,
            )
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Searching for: https://api.example.com/v1/users"));
        assert!(out.contains("1. Direct URL references:\nhit.py:1:https://api\\.example\\.com/v1/users\n"));
        assert!(out.contains("2. Domain references (api.example.com):\nhit.py:1:api\\.example\\.com\n"));
        assert!(out.contains(
            "3. HTTP client usage:\nhit.py:1:(RestTemplate|requests|HttpClient|WebClient)\n"
        ));
    }

    #[test]
    fn http_usage_is_limited_to_java_and_python() {
        let mut runner = MockRunner::new();
        runner.expect_run().returning(|invocation| {
            let types = invocation.args().join(" ");
            Ok(RawOutput {
                stdout: if types.contains("-t java -t py") {
                    "typed\n".into()
                } else {
                    String::new()
                },
                ..Default::default()
            })
        });
        let tracker = Tracker::new(runner, "rg", ".");

        let mut out = Vec::new();
        tracker.explore(&Target::new("/v1/chat"), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("Domain references"));
        assert!(out.ends_with("3. HTTP client usage:\ntyped\n\n"));
    }

    #[test]
    fn missing_tool_aborts_exploration() {
        let mut runner = MockRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_| Err(TraceError::tool_unavailable("rg", None)));
        let tracker = Tracker::new(runner, "rg", ".");

        let mut out = Vec::new();
        let result = tracker.explore(&Target::new("https://a.example.com/x"), &mut out);

        assert!(result.is_err());
    }
}
