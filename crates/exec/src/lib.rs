//! Process infrastructure adapter.
//!
//! Implements the [`compile`] crate's ports:
//!
//! - [`StdProcessLauncher`]: [`compile::ProcessLauncher`] over `std::process`.
//! - [`JavacArgumentsGenerator`]: [`compile::CompileSpecToArguments`] for `javac`.
//! - [`TracingCompilerEvents`]: [`compile::CompilerEvents`] as `tracing` events.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Spawning, stream capture, and process cleanup live here.
//! The [`compile`] crate sees only its own traits.

pub mod arguments;
pub mod events;
pub mod launcher;

pub use arguments::JavacArgumentsGenerator;
pub use events::TracingCompilerEvents;
pub use launcher::{StdProcessLauncher, DEFAULT_DRAIN_TIMEOUT};

use compile::CommandLineJavaCompiler;

/// The production compiler wiring: real processes, `javac` arguments,
/// `tracing` events.
pub type JavaCommandLineCompiler =
    CommandLineJavaCompiler<StdProcessLauncher, JavacArgumentsGenerator, TracingCompilerEvents>;

/// Creates the production compiler.
pub fn command_line_compiler() -> JavaCommandLineCompiler {
    CommandLineJavaCompiler::new(StdProcessLauncher::new(), JavacArgumentsGenerator::new())
        .with_events(TracingCompilerEvents)
}
