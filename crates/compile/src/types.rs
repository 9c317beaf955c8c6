//! Shared value types for the compiler invocation domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the structured data that flows through one invocation: the compile spec
//! supplied by the caller, the process description built from it, and the
//! outcome reported back by the process launcher.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ResolvedExecutable;

// ---------------------------------------------------------------------------
// Compile specs
// ---------------------------------------------------------------------------

/// Options describing how to run the compiler out of process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForkOptions {
    /// Explicit compiler executable (command name or path).
    ///
    /// Ignored when [`ForkOptions::java_home`] is set.
    pub executable: Option<String>,

    /// Root directory of an alternate JDK installation. The compiler binary is
    /// derived from it by the standard toolchain layout.
    pub java_home: Option<PathBuf>,

    /// Initial heap size for the compiler's VM (e.g. `"64m"`).
    pub memory_initial_size: Option<String>,

    /// Maximum heap size for the compiler's VM (e.g. `"1g"`).
    pub memory_maximum_size: Option<String>,

    /// Extra arguments for the compiler's VM, passed through as `-J<arg>`.
    pub jvm_args: Vec<String>,
}

/// Description of one compilation unit.
///
/// Owned by the caller; read-only to this crate.
///
/// Paths that end up on the compiler command line (destination, classpath,
/// sources) must be valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaCompileSpec {
    /// Directory the compiler process is started in.
    pub working_dir: PathBuf,

    /// Output directory for compiled classes (`-d`).
    #[serde(default)]
    pub destination_dir: Option<PathBuf>,

    /// Compile classpath entries, in order.
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Source files to compile, in order.
    #[serde(default)]
    pub source_files: Vec<PathBuf>,

    /// Additional compiler arguments, passed through verbatim.
    #[serde(default)]
    pub compiler_args: Vec<String>,

    /// Out-of-process execution options.
    #[serde(default)]
    pub fork_options: ForkOptions,
}

impl JavaCompileSpec {
    /// Creates a spec rooted at `working_dir` with every other field empty.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            destination_dir: None,
            classpath: Vec::new(),
            source_files: Vec::new(),
            compiler_args: Vec::new(),
            fork_options: ForkOptions::default(),
        }
    }
}

/// A compile spec that names the compiler executable directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLineCompileSpec {
    /// The compiler to run. Takes precedence over any fork options.
    pub executable: ResolvedExecutable,

    /// The remainder of the compilation unit description.
    pub spec: JavaCompileSpec,
}

/// A compile spec, in either of its two flavours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompileSpec {
    /// The executable is derived from the fork options.
    Generic(JavaCompileSpec),
    /// The executable is carried by the spec itself.
    CommandLine(CommandLineCompileSpec),
}

impl CompileSpec {
    /// Returns the compilation unit description shared by both flavours.
    pub fn java_spec(&self) -> &JavaCompileSpec {
        match self {
            CompileSpec::Generic(spec) => spec,
            CompileSpec::CommandLine(cmd) => &cmd.spec,
        }
    }

    /// Returns the directory the compiler process is started in.
    pub fn working_dir(&self) -> &Path {
        &self.java_spec().working_dir
    }

    /// Returns the out-of-process execution options.
    pub fn fork_options(&self) -> &ForkOptions {
        &self.java_spec().fork_options
    }
}

impl From<JavaCompileSpec> for CompileSpec {
    fn from(spec: JavaCompileSpec) -> Self {
        CompileSpec::Generic(spec)
    }
}

impl From<CommandLineCompileSpec> for CompileSpec {
    fn from(spec: CommandLineCompileSpec) -> Self {
        CompileSpec::CommandLine(spec)
    }
}

// ---------------------------------------------------------------------------
// Process description
// ---------------------------------------------------------------------------

/// Everything the process launcher needs to start the compiler.
///
/// Built once per invocation through [`ProcessDescriptionBuilder`] and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDescription {
    executable: ResolvedExecutable,
    working_dir: PathBuf,
    arguments: Vec<String>,
    ignore_exit_value: bool,
}

impl ProcessDescription {
    /// Starts building a description for `executable` run in `working_dir`.
    pub fn builder(
        executable: ResolvedExecutable,
        working_dir: impl Into<PathBuf>,
    ) -> ProcessDescriptionBuilder {
        ProcessDescriptionBuilder {
            executable,
            working_dir: working_dir.into(),
            arguments: Vec::new(),
            ignore_exit_value: false,
        }
    }

    /// Returns the executable to start.
    pub fn executable(&self) -> &ResolvedExecutable {
        &self.executable
    }

    /// Returns the directory the process is started in.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Returns the command-line arguments, in order.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Returns `true` if a non-zero exit status must be reported as an outcome
    /// rather than treated as a launch error by the launcher.
    pub fn ignore_exit_value(&self) -> bool {
        self.ignore_exit_value
    }
}

/// Mutable builder for a [`ProcessDescription`].
///
/// Implements [`crate::ArgCollector`] so an argument generator can append
/// arguments without knowing how they reach the process.
#[derive(Debug, Clone)]
pub struct ProcessDescriptionBuilder {
    executable: ResolvedExecutable,
    working_dir: PathBuf,
    arguments: Vec<String>,
    ignore_exit_value: bool,
}

impl ProcessDescriptionBuilder {
    /// Appends one argument.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.arguments.push(arg.into());
        self
    }

    /// Sets whether a non-zero exit status is left for the caller to interpret.
    pub fn ignore_exit_value(&mut self, ignore: bool) -> &mut Self {
        self.ignore_exit_value = ignore;
        self
    }

    /// Finishes the description.
    pub fn build(self) -> ProcessDescription {
        ProcessDescription {
            executable: self.executable,
            working_dir: self.working_dir,
            arguments: self.arguments,
            ignore_exit_value: self.ignore_exit_value,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What the launcher observed after the process terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Exit status reported by the process.
    pub exit_status: i32,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error; for a compiler this holds the diagnostics.
    pub stderr: String,

    /// When the process was started.
    pub started_at: Timestamp,

    /// When the process was observed to have terminated.
    pub finished_at: Timestamp,
}

/// Result of a successful compile step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkResult {
    did_work: bool,
}

impl WorkResult {
    /// Creates a [`WorkResult`].
    pub fn new(did_work: bool) -> Self {
        Self { did_work }
    }

    /// Returns `true` if the step performed work.
    pub fn did_work(self) -> bool {
        self.did_work
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Milliseconds elapsed between `earlier` and `self` (negative if `earlier`
    /// is later).
    pub fn millis_since(self, earlier: Timestamp) -> i64 {
        (self.0 - earlier.0).num_milliseconds()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
