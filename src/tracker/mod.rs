mod explore;
pub mod grep_match;
pub mod invocation;
mod parser;
mod patterns;
pub mod property_keys;
pub mod report;
pub mod results;
pub mod runner;

use crate::error::Result;
use anyhow::Context;
use clap::ValueEnum;
use invocation::{escape, extensions_glob, Invocation, InvocationBuilder};
use report::MigrationReport;
use results::ResultsByFile;
use runner::{InvocationResult, Runner};
use std::{
    fmt::{self, Display, Formatter},
    io::Write,
    path::PathBuf,
};
use strum::Display;
use tracing::{debug, info, warn};

/// What to print for each target.
#[derive(Display, Default, PartialEq, Eq, Copy, Clone, Debug, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Aggregated migration report built from JSON output.
    #[default]
    Report,
    /// Raw human readable search output.
    Explore,
}

/// A URL, endpoint path, property key or variable to trace, optionally
/// labeled with the service it belongs to.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub value: String,
    pub label: Option<String>,
}

impl Target {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    /// Text after the last `/`, e.g. `users` for `https://host/v1/users`.
    fn last_segment(&self) -> Option<&str> {
        self.value
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty() && *segment != self.value)
    }

    /// Host part of a URL, or everything up to the first `/` without a scheme.
    fn host(&self) -> &str {
        let without_scheme = self
            .value
            .split_once("://")
            .map_or(self.value.as_str(), |(_, rest)| rest);
        without_scheme.split('/').next().unwrap_or_default()
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label} ({})", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

pub struct Tracker<R> {
    runner: R,
    program: String,
    root: PathBuf,
}

impl<R: Runner> Tracker<R> {
    pub fn new(runner: R, program: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            program: program.into(),
            root: root.into(),
        }
    }

    fn build(&self, builder: InvocationBuilder) -> Invocation {
        builder.root(&self.root).build(&self.program)
    }

    /// Full target, its last path segment, and the target inside config files.
    pub fn literal_invocations(&self, target: &Target) -> Vec<Invocation> {
        let escaped = escape(&target.value);

        let mut invocations =
            vec![self.build(InvocationBuilder::new(escaped.clone()).case_insensitive(true))];
        if let Some(segment) = target.last_segment() {
            invocations
                .push(self.build(InvocationBuilder::new(escape(segment)).case_insensitive(true)));
        }
        invocations
            .push(self.build(InvocationBuilder::new(escaped).glob(invocation::config_glob())));

        invocations
    }

    pub fn property_invocations(&self, key: &str) -> Vec<Invocation> {
        let escaped = escape(key);
        patterns::PROPERTY_ACCESS
            .iter()
            .map(|template| {
                self.build(
                    InvocationBuilder::new(patterns::fill(template, &escaped))
                        .glob(invocation::source_glob()),
                )
            })
            .collect()
    }

    pub fn http_invocations(&self) -> Vec<Invocation> {
        let jvm = patterns::JVM_HTTP_CALLS
            .iter()
            .map(|pattern| (*pattern, extensions_glob(&patterns::JVM_EXTENSIONS)));
        let python = patterns::PYTHON_HTTP_CALLS
            .iter()
            .map(|pattern| (*pattern, extensions_glob(&patterns::PYTHON_EXTENSIONS)));

        jvm.chain(python)
            .map(|(pattern, glob)| {
                self.build(InvocationBuilder::new(pattern).glob(glob).context(2, 5))
            })
            .collect()
    }

    pub fn variable_invocations(&self, variable: &str) -> Vec<Invocation> {
        let escaped = escape(variable);
        patterns::VARIABLE_USAGE
            .iter()
            .map(|template| {
                self.build(
                    InvocationBuilder::new(patterns::fill(template, &escaped))
                        .glob(invocation::source_glob())
                        .context(2, 3),
                )
            })
            .collect()
    }

    /// Runs the invocations one after another and groups their matches by
    /// file. A failed invocation is logged and contributes nothing.
    pub fn run_phase(&self, invocations: &[Invocation]) -> Result<ResultsByFile> {
        let mut results = ResultsByFile::default();

        for invocation in invocations {
            match runner::execute(&self.runner, invocation)? {
                InvocationResult::Completed(matches) => results.add_matches(matches),
                InvocationResult::Failed(reason) => {
                    warn!(command = %invocation, reason = %reason, "skipping failed search")
                }
            }
        }

        if results.is_empty() {
            debug!(invocations = invocations.len(), "phase found no matches");
        }

        Ok(results)
    }

    pub fn search_literal(&self, target: &Target) -> Result<ResultsByFile> {
        self.run_phase(&self.literal_invocations(target))
    }

    pub fn search_property_references(&self, key: &str) -> Result<ResultsByFile> {
        self.run_phase(&self.property_invocations(key))
    }

    pub fn search_http_calls(&self) -> Result<ResultsByFile> {
        self.run_phase(&self.http_invocations())
    }

    pub fn trace_variable_usage(&self, variable: &str) -> Result<ResultsByFile> {
        self.run_phase(&self.variable_invocations(variable))
    }

    pub fn migration_report(&self, target: &Target, variables: &[String]) -> Result<MigrationReport> {
        let direct = self.search_literal(target)?;
        let property_keys = property_keys::extract(&direct);

        let property_usages = property_keys
            .iter()
            .map(|key| Ok((key.clone(), self.search_property_references(key)?)))
            .collect::<Result<Vec<_>>>()?;

        let http_calls = self.search_http_calls()?;

        let variable_usages = variables
            .iter()
            .map(|variable| Ok((variable.clone(), self.trace_variable_usage(variable)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(MigrationReport {
            target: target.clone(),
            direct,
            property_keys,
            property_usages,
            http_calls,
            variable_usages,
        })
    }

    /// Traces every target in order, writing each result as soon as it is
    /// ready. An unavailable search tool stops the run before later targets.
    pub fn run(
        &self,
        mode: Mode,
        targets: &[Target],
        variables: &[String],
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        for target in targets {
            info!(%target, %mode, "tracing references");

            match mode {
                Mode::Report => {
                    let report = self.migration_report(target, variables)?;
                    info!(
                        %target,
                        files = report.direct.number_of_files(),
                        matches = report.direct.number_of_matches(),
                        keys = report.property_keys.len(),
                        "report ready"
                    );
                    write!(out, "{report}").context("failed to write report")?;
                }
                Mode::Explore => self.explore(target, out)?,
            }
        }

        out.flush().context("failed to flush output")?;
        Ok(())
    }
}
