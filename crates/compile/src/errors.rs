//! Error types for the compiler invocation domain.
//!
//! Three failure families reach the build engine:
//!
//! - [`InvocationFailure`]: the compiler process could not be run to completion.
//! - [`CompilationFailure`]: the process ran and exited with a non-zero status.
//! - [`ConfigurationNotFoundError`]: raised by dependency resolution while
//!   building the compile spec; carried here so the engine reports it through
//!   the same path.
//!
//! [`CompileError`] wraps all of them. [`CompileError::report`] turns any of
//! them into a [`BuildStepFailure`], the single shape the engine presents.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ConfigurationName, ModuleId, ResolvedExecutable};

// ---------------------------------------------------------------------------
// Compilation failure
// ---------------------------------------------------------------------------

/// The compiler process terminated with a non-zero exit status.
///
/// Carries the exact status reported by the process, never clamped or
/// reinterpreted. The compiler's own diagnostics are captured separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[error("Compilation failed; see the compiler error output for details (exit status {exit_status})")]
pub struct CompilationFailure {
    exit_status: i32,
}

impl CompilationFailure {
    /// Creates a failure for `exit_status`.
    pub fn new(exit_status: i32) -> Self {
        Self { exit_status }
    }

    /// Returns the exit status reported by the compiler process.
    pub fn exit_status(self) -> i32 {
        self.exit_status
    }
}

// ---------------------------------------------------------------------------
// Invocation failure
// ---------------------------------------------------------------------------

/// The compiler process could not be run to completion: it failed to start
/// (missing binary, permission denied, bad working directory), could not be
/// awaited, or exited non-zero when the description asked for the exit value
/// to be checked.
///
/// The platform error is kept as the [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("Compiler process '{executable}' failed: {source}")]
pub struct InvocationFailure {
    executable: ResolvedExecutable,
    #[source]
    source: std::io::Error,
}

impl InvocationFailure {
    /// Creates a failure for `executable` caused by `source`.
    pub fn new(executable: ResolvedExecutable, source: std::io::Error) -> Self {
        Self { executable, source }
    }

    /// Returns the executable that failed.
    pub fn executable(&self) -> &ResolvedExecutable {
        &self.executable
    }

    /// Returns the underlying platform error.
    pub fn io_error(&self) -> &std::io::Error {
        &self.source
    }
}

// ---------------------------------------------------------------------------
// Configuration not found
// ---------------------------------------------------------------------------

/// Metadata format of a dependency declared outside the native module format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalMetadataFormat {
    /// A Maven POM.
    Maven,
    /// An Ivy descriptor.
    Ivy,
}

impl std::fmt::Display for ExternalMetadataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExternalMetadataFormat::Maven => write!(f, "Maven"),
            ExternalMetadataFormat::Ivy => write!(f, "Ivy"),
        }
    }
}

/// Where the module that lacks the configuration was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationOrigin {
    /// The build system's own module metadata.
    Native,
    /// A foreign packaging ecosystem's metadata.
    External(ExternalMetadataFormat),
}

/// A named configuration could not be located while resolving a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ConfigurationNotFoundError {
    message: String,
    origin: ConfigurationOrigin,
}

impl ConfigurationNotFoundError {
    /// Creates an error with a caller-supplied message.
    pub fn new(message: impl Into<String>, origin: ConfigurationOrigin) -> Self {
        Self {
            message: message.into(),
            origin,
        }
    }

    /// Creates the error raised when `module` does not declare `configuration`.
    ///
    /// The message names both, and the metadata format for external origins.
    pub fn not_declared(
        configuration: &ConfigurationName,
        module: &ModuleId,
        origin: ConfigurationOrigin,
    ) -> Self {
        let mut message = format!(
            "A dependency was declared on configuration '{configuration}' of '{module}' \
             but no variant with that name exists."
        );
        if let ConfigurationOrigin::External(metadata) = origin {
            message.push_str(&format!(" (declared in {metadata} metadata)"));
        }
        Self { message, origin }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns where the module was declared.
    pub fn origin(&self) -> ConfigurationOrigin {
        self.origin
    }

    /// Returns `true` for modules declared through foreign metadata.
    pub fn is_external(&self) -> bool {
        matches!(self.origin, ConfigurationOrigin::External(_))
    }
}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every way a compile step can fail.
#[derive(Debug, Error)]
pub enum CompileError {
    /// No compiler executable could be resolved from the compile spec.
    ///
    /// Produced by: the executable resolver when neither the spec nor its fork
    /// options name a compiler.
    #[error("No compiler executable configured: set an executable or a Java home in the fork options")]
    ExecutableNotConfigured,

    /// The compiler process could not be started or awaited.
    #[error(transparent)]
    Invocation(#[from] InvocationFailure),

    /// The compiler ran and exited with a non-zero status.
    #[error(transparent)]
    Compilation(#[from] CompilationFailure),

    /// Dependency resolution feeding the compile spec failed.
    #[error(transparent)]
    ConfigurationNotFound(#[from] ConfigurationNotFoundError),
}

impl CompileError {
    /// Returns the failure family, for reporting and dispatch.
    pub fn kind(&self) -> FailureKind {
        match self {
            CompileError::ExecutableNotConfigured => FailureKind::ExecutableNotConfigured,
            CompileError::Invocation(_) => FailureKind::Invocation,
            CompileError::Compilation(_) => FailureKind::Compilation,
            CompileError::ConfigurationNotFound(e) if e.is_external() => {
                FailureKind::ExternalConfigurationNotFound
            }
            CompileError::ConfigurationNotFound(_) => FailureKind::ConfigurationNotFound,
        }
    }

    /// Returns the compiler's exit status, when the failure carries one.
    pub fn exit_status(&self) -> Option<i32> {
        match self {
            CompileError::Compilation(failure) => Some(failure.exit_status()),
            _ => None,
        }
    }

    /// Builds the uniform report the engine presents for a failed build step.
    pub fn report(&self) -> BuildStepFailure {
        BuildStepFailure {
            kind: self.kind(),
            message: self.to_string(),
            exit_status: self.exit_status(),
        }
    }
}

/// Failure family of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// See [`CompileError::ExecutableNotConfigured`].
    ExecutableNotConfigured,
    /// See [`InvocationFailure`].
    Invocation,
    /// See [`CompilationFailure`].
    Compilation,
    /// A [`ConfigurationNotFoundError`] with a native origin.
    ConfigurationNotFound,
    /// A [`ConfigurationNotFoundError`] with an external origin.
    ExternalConfigurationNotFound,
}

/// "Build step failed with diagnostic message": the one shape every failure
/// family is presented in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStepFailure {
    /// Failure family.
    pub kind: FailureKind,

    /// Human-readable description.
    pub message: String,

    /// Compiler exit status, for [`FailureKind::Compilation`] only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_status: Option<i32>,
}
