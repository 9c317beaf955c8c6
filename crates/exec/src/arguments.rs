//! Default command-line argument generation for `javac`.

use std::path::PathBuf;

use compile::{ArgCollector, CompileSpec, CompileSpecToArguments};

/// Separator between classpath entries on this platform.
const CLASSPATH_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Builds a `javac` command line from a compile spec.
///
/// Emits, in order: VM options for the compiler process (`-J-Xms`, `-J-Xmx`,
/// `-J<arg>`), `-d`, `-classpath`, the extra compiler arguments, then the
/// source files.
///
/// The `javac` command line is text, so paths must be valid UTF-8. Specs
/// loaded from JSON always are. Any invalid sequence in a path built another
/// way is replaced with U+FFFD rather than passed through.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavacArgumentsGenerator;

impl JavacArgumentsGenerator {
    /// Creates a generator.
    pub fn new() -> Self {
        Self
    }

    /// Returns the arguments for `spec` as a list.
    pub fn generate(&self, spec: &CompileSpec) -> Vec<String> {
        let mut args = Vec::new();
        self.collect_arguments(spec, &mut args);
        args
    }
}

impl CompileSpecToArguments for JavacArgumentsGenerator {
    fn collect_arguments(&self, spec: &CompileSpec, collector: &mut dyn ArgCollector) {
        let java = spec.java_spec();
        let fork = &java.fork_options;

        if let Some(size) = &fork.memory_initial_size {
            collector.add(&format!("-J-Xms{size}"));
        }
        if let Some(size) = &fork.memory_maximum_size {
            collector.add(&format!("-J-Xmx{size}"));
        }
        for arg in &fork.jvm_args {
            collector.add(&format!("-J{arg}"));
        }

        if let Some(dest) = &java.destination_dir {
            collector.add("-d");
            collector.add(&dest.to_string_lossy());
        }

        if !java.classpath.is_empty() {
            collector.add("-classpath");
            collector.add(&join_classpath(&java.classpath));
        }

        collector.add_all(&java.compiler_args);

        for source in &java.source_files {
            collector.add(&source.to_string_lossy());
        }
    }
}

fn join_classpath(entries: &[PathBuf]) -> String {
    entries
        .iter()
        .map(|entry| entry.to_string_lossy())
        .collect::<Vec<_>>()
        .join(CLASSPATH_SEPARATOR)
}
