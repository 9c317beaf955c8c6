//! Port traits implemented by infrastructure crates.
//!
//! The domain defines *what* it needs from the outside world; `exec` supplies
//! *how*. Every trait here is synchronous: a compiler invocation blocks the
//! calling thread until the process terminates.

use crate::{
    CompileError, CompileSpec, ExecutionOutcome, InvocationFailure, InvocationId,
    ProcessDescription, ProcessDescriptionBuilder, WorkResult,
};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Sink for ordered command-line arguments.
///
/// Decouples where arguments come from from how they are delivered to the
/// process.
pub trait ArgCollector {
    /// Appends one argument.
    fn add(&mut self, arg: &str);

    /// Appends every argument in `args`, in order.
    fn add_all(&mut self, args: &[String]) {
        for arg in args {
            self.add(arg);
        }
    }
}

impl ArgCollector for ProcessDescriptionBuilder {
    fn add(&mut self, arg: &str) {
        self.arg(arg);
    }
}

impl ArgCollector for Vec<String> {
    fn add(&mut self, arg: &str) {
        self.push(arg.to_owned());
    }
}

/// Produces the compiler's command-line arguments for a compile spec.
///
/// Must be deterministic: the same spec always yields the same arguments.
pub trait CompileSpecToArguments: Send + Sync {
    /// Appends the arguments for `spec` to `collector`.
    fn collect_arguments(&self, spec: &CompileSpec, collector: &mut dyn ArgCollector);
}

// ---------------------------------------------------------------------------
// Process launching
// ---------------------------------------------------------------------------

/// Starts a process, blocks until it terminates, and reports its exit status.
///
/// Implementations must await (or kill and reap) the child on every path.
/// When [`ProcessDescription::ignore_exit_value`] is `false`, a non-zero exit
/// status is reported as an [`InvocationFailure`] instead of an outcome.
pub trait ProcessLauncher: Send + Sync {
    /// Runs `description` to completion.
    fn launch(
        &self,
        description: &ProcessDescription,
    ) -> Result<ExecutionOutcome, InvocationFailure>;
}

// ---------------------------------------------------------------------------
// Observability
// ---------------------------------------------------------------------------

/// Receives structured events from the compiler executor.
///
/// All methods default to doing nothing.
pub trait CompilerEvents: Send + Sync {
    /// The compiler is about to be started.
    fn compiling(&self, _invocation: InvocationId, _description: &ProcessDescription) {}

    /// The compiler process terminated (with any exit status).
    fn finished(&self, _invocation: InvocationId, _outcome: &ExecutionOutcome) {}

    /// The compile step failed.
    fn failed(&self, _invocation: InvocationId, _error: &CompileError) {}
}

/// A [`CompilerEvents`] implementation that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCompilerEvents;

impl CompilerEvents for NoopCompilerEvents {}

// ---------------------------------------------------------------------------
// Compiler
// ---------------------------------------------------------------------------

/// A compiler for one compilation unit.
pub trait Compiler: Send + Sync {
    /// Compiles `spec`, blocking until the compiler finishes.
    fn execute(&self, spec: &CompileSpec) -> Result<WorkResult, CompileError>;
}
