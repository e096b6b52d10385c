use crate::tracker::{Mode, Target};
use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

pub const ROOT_ENV: &str = "REFTRACE_ROOT";
pub const SEARCH_TOOL_ENV: &str = "REFTRACE_RG";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(group(
            ArgGroup::new("any-target")
                .args(&["targets", "endpoints"])
                .multiple(true)
                .required(true)
))]
pub struct Args {
    /// URLs, endpoint paths or property keys to trace, in order.
    pub targets: Vec<String>,
    /// Endpoint of a service to trace, given as SERVICE=PATH.
    /// Multiple endpoints may be provided; they are traced after TARGETS.
    #[clap(short, long = "endpoint", value_name = "SERVICE=PATH", value_parser = parse_endpoint)]
    pub endpoints: Vec<Target>,
    /// Root directory of the project to search.
    #[clap(short, long, env = ROOT_ENV, default_value = ".")]
    pub path: PathBuf,
    /// Name or path of the ripgrep binary.
    #[clap(long = "rg", env = SEARCH_TOOL_ENV, default_value = "rg")]
    pub search_tool: String,
    /// Print an aggregated report or the raw search output.
    #[clap(short, long, value_enum, default_value_t = Mode::Report)]
    pub mode: Mode,
    /// Also trace where the given variable or method is used.
    /// Multiple names may be provided.
    #[clap(long = "trace-variable", value_name = "NAME")]
    pub variables: Vec<String>,
    /// Log more details to stderr. Repeat for debug output.
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_endpoint(value: &str) -> Result<Target, String> {
    match value.split_once('=') {
        Some((service, path)) if !service.trim().is_empty() && !path.trim().is_empty() => {
            Ok(Target::labeled(service.trim(), path.trim()))
        }
        _ => Err(format!("expected SERVICE=PATH, got '{value}'")),
    }
}

impl Args {
    /// Positional targets first, then labeled endpoints.
    pub fn targets(&self) -> Vec<Target> {
        self.targets
            .iter()
            .cloned()
            .map(Target::new)
            .chain(self.endpoints.iter().cloned())
            .collect()
    }
}
