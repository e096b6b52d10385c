use itertools::Itertools;
use std::{
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
};
use strum::Display;

/// Extensions of files treated as configuration.
pub const CONFIG_EXTENSIONS: [&str; 7] = ["properties", "yml", "yaml", "json", "conf", "ini", "env"];

/// Extensions of the JVM and Python sources that consume configuration.
pub const SOURCE_EXTENSIONS: [&str; 4] = ["java", "py", "kt", "scala"];

#[derive(Display, Default, PartialEq, Eq, Copy, Clone, Debug)]
#[strum(serialize_all = "lowercase")]
pub enum OutputMode {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human readable `path:line:text` lines without colors.
    Plain,
}

/// Escapes regex metacharacters of a literal before it is embedded in a pattern.
pub fn escape(literal: &str) -> String {
    regex::escape(literal)
}

/// Brace-expansion glob covering the given extensions, e.g. `*.{yml,yaml}`.
pub fn extensions_glob(extensions: &[&str]) -> String {
    match extensions {
        [single] => format!("*.{single}"),
        _ => format!("*.{{{}}}", extensions.iter().join(",")),
    }
}

pub fn config_glob() -> String {
    extensions_glob(&CONFIG_EXTENSIONS)
}

pub fn source_glob() -> String {
    extensions_glob(&SOURCE_EXTENSIONS)
}

/// A fully built command line for one run of the search tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    pattern: String,
}

impl Invocation {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args.iter().join(" "))
    }
}

#[derive(Clone, Debug)]
pub struct InvocationBuilder {
    pattern: String,
    mode: OutputMode,
    case_insensitive: bool,
    context_before: i32,
    context_after: i32,
    file_types: Vec<String>,
    globs: Vec<String>,
    root: Option<PathBuf>,
}

impl InvocationBuilder {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            mode: OutputMode::default(),
            case_insensitive: false,
            context_before: 0,
            context_after: 0,
            file_types: Vec::new(),
            globs: Vec::new(),
            root: None,
        }
    }

    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn context(mut self, before: i32, after: i32) -> Self {
        self.context_before = before;
        self.context_after = after;
        self
    }

    pub fn file_types<I, S>(mut self, file_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_types = file_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn glob(mut self, glob: impl Into<String>) -> Self {
        self.globs.push(glob.into());
        self
    }

    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = Some(root.as_ref().into());
        self
    }

    pub fn build(self, program: &str) -> Invocation {
        let mut args: Vec<String> = match self.mode {
            OutputMode::Json => vec!["--json".into()],
            OutputMode::Plain => vec![
                "--no-heading".into(),
                "--line-number".into(),
                "--color=never".into(),
            ],
        };

        if self.case_insensitive {
            args.push("-i".into());
        }

        if self.context_before > 0 {
            args.extend(["-B".into(), self.context_before.to_string()]);
        }
        if self.context_after > 0 {
            args.extend(["-A".into(), self.context_after.to_string()]);
        }

        for file_type in self.file_types {
            args.extend(["-t".into(), file_type]);
        }

        for glob in self.globs {
            args.extend(["-g".into(), glob]);
        }

        // a leading dash would otherwise be read as a flag
        if self.pattern.starts_with('-') {
            args.extend(["-e".into(), self.pattern.clone()]);
        } else {
            args.push(self.pattern.clone());
        }

        if let Some(root) = self.root {
            args.push(root.to_string_lossy().into_owned());
        }

        Invocation {
            program: program.into(),
            args,
            pattern: self.pattern,
        }
    }
}
