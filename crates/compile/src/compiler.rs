//! The command-line compiler: resolve, launch, classify.

use crate::{
    classify, resolve, CompileError, CompileSpec, CompileSpecToArguments, Compiler, CompilerEvents,
    InvocationId, NoopCompilerEvents, ProcessDescription, ProcessLauncher, ResolvedExecutable,
    WorkResult,
};

/// Runs an external compiler binary for one compilation unit.
///
/// Holds no state between invocations; every call builds its own
/// [`ProcessDescription`] and may run concurrently with other calls.
#[derive(Debug, Clone)]
pub struct CommandLineJavaCompiler<L, A, E = NoopCompilerEvents> {
    launcher: L,
    arguments: A,
    events: E,
}

impl<L, A> CommandLineJavaCompiler<L, A, NoopCompilerEvents>
where
    L: ProcessLauncher,
    A: CompileSpecToArguments,
{
    /// Creates a compiler that starts processes with `launcher` and builds
    /// their command lines with `arguments`.
    pub fn new(launcher: L, arguments: A) -> Self {
        Self {
            launcher,
            arguments,
            events: NoopCompilerEvents,
        }
    }
}

impl<L, A, E> CommandLineJavaCompiler<L, A, E>
where
    L: ProcessLauncher,
    A: CompileSpecToArguments,
    E: CompilerEvents,
{
    /// Replaces the observability collaborator.
    pub fn with_events<E2: CompilerEvents>(self, events: E2) -> CommandLineJavaCompiler<L, A, E2> {
        CommandLineJavaCompiler {
            launcher: self.launcher,
            arguments: self.arguments,
            events,
        }
    }

    /// Builds the process description for running `executable` on `spec`.
    ///
    /// The launcher is told to leave non-zero exit statuses alone; they are
    /// classified by [`classify`] so the failure keeps the raw status.
    pub fn describe(
        &self,
        executable: ResolvedExecutable,
        spec: &CompileSpec,
    ) -> ProcessDescription {
        let mut builder = ProcessDescription::builder(executable, spec.working_dir());
        self.arguments.collect_arguments(spec, &mut builder);
        builder.ignore_exit_value(true);
        builder.build()
    }

    /// Runs `executable` on `spec` and classifies the exit status.
    ///
    /// A process that cannot be started is reported as
    /// [`CompileError::Invocation`], never as a compilation failure.
    pub fn run(
        &self,
        invocation: InvocationId,
        executable: ResolvedExecutable,
        spec: &CompileSpec,
    ) -> Result<WorkResult, CompileError> {
        let description = self.describe(executable, spec);
        self.events.compiling(invocation, &description);

        let outcome = self.launcher.launch(&description)?;
        self.events.finished(invocation, &outcome);

        Ok(classify(outcome.exit_status)?)
    }

    fn compile(
        &self,
        invocation: InvocationId,
        spec: &CompileSpec,
    ) -> Result<WorkResult, CompileError> {
        let executable = resolve(spec).ok_or(CompileError::ExecutableNotConfigured)?;
        self.run(invocation, executable, spec)
    }
}

impl<L, A, E> Compiler for CommandLineJavaCompiler<L, A, E>
where
    L: ProcessLauncher,
    A: CompileSpecToArguments,
    E: CompilerEvents,
{
    fn execute(&self, spec: &CompileSpec) -> Result<WorkResult, CompileError> {
        let invocation = InvocationId::new_random();
        let result = self.compile(invocation, spec);
        if let Err(error) = &result {
            self.events.failed(invocation, error);
        }
        result
    }
}
