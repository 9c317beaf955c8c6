//! [`CompilerEvents`] over `tracing`.

use compile::{CompileError, CompilerEvents, ExecutionOutcome, InvocationId, ProcessDescription};
use tracing::{debug, error, info, warn};

/// Emits compiler invocation events as structured `tracing` events.
///
/// The compiler's diagnostics (standard error) are attached to the warning
/// emitted for a non-zero exit so the build log shows why compilation failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCompilerEvents;

impl CompilerEvents for TracingCompilerEvents {
    fn compiling(&self, invocation: InvocationId, description: &ProcessDescription) {
        info!(
            %invocation,
            executable = %description.executable(),
            working_dir = %description.working_dir().display(),
            argument_count = description.arguments().len(),
            "Compiling with Java command line compiler"
        );
        debug!(%invocation, arguments = ?description.arguments(), "Compiler arguments");
    }

    fn finished(&self, invocation: InvocationId, outcome: &ExecutionOutcome) {
        let duration_ms = outcome.finished_at.millis_since(outcome.started_at);
        if !outcome.stdout.is_empty() {
            debug!(%invocation, stdout = %outcome.stdout, "Compiler output");
        }

        if outcome.exit_status == 0 {
            info!(%invocation, duration_ms, "Compiler finished");
        } else {
            warn!(
                %invocation,
                exit_status = outcome.exit_status,
                duration_ms,
                diagnostics = %outcome.stderr,
                "Compiler exited with non-zero status"
            );
        }
    }

    fn failed(&self, invocation: InvocationId, err: &CompileError) {
        error!(%invocation, kind = ?err.kind(), error = %err, "Compile step failed");
    }
}
