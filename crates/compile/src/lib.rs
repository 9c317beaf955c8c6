//! Core domain for running an external compiler as one build step.
//!
//! This crate contains the compile spec model, executable resolution, exit
//! status classification, the error taxonomy the build engine reports, and the
//! port traits infrastructure crates implement. It decides *which* binary to
//! run and *what* its exit status means; `exec` decides *how* a process runs.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`InvocationId`, `ModuleId`, `ResolvedExecutable`) |
//! | [`types`] | Compile specs, process descriptions, outcomes |
//! | [`errors`] | Failure families and the uniform `BuildStepFailure` report |
//! | [`resolver`] | Which compiler binary to run |
//! | [`classifier`] | What an exit status means |
//! | [`ports`] | Traits for argument generation, process launching, observability |
//! | [`compiler`] | `CommandLineJavaCompiler`, tying the above together |

pub mod classifier;
pub mod compiler;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod resolver;
pub mod types;


// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use classifier::classify;
pub use compiler::CommandLineJavaCompiler;
pub use errors::{
    BuildStepFailure, CompilationFailure, CompileError, ConfigurationNotFoundError,
    ConfigurationOrigin, ExternalMetadataFormat, FailureKind, InvocationFailure,
};
pub use identifiers::{ConfigurationName, InvocationId, ModuleId, ResolvedExecutable};
pub use ports::{
    ArgCollector, CompileSpecToArguments, Compiler, CompilerEvents, NoopCompilerEvents,
    ProcessLauncher,
};
pub use resolver::{javac_for_home, resolve, JAVAC};
pub use types::{
    CommandLineCompileSpec, CompileSpec, ExecutionOutcome, ForkOptions, JavaCompileSpec,
    ProcessDescription, ProcessDescriptionBuilder, Timestamp, WorkResult,
};
