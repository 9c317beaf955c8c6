//! Compiler executable resolution.
//!
//! Precedence, first match wins:
//!
//! 1. A [`CompileSpec::CommandLine`] spec's own executable.
//! 2. The fork options' Java home, via the standard JDK layout.
//! 3. The fork options' executable string.
//!
//! Otherwise nothing is resolved; no default compiler is assumed. Resolution is
//! pure path composition and never touches the filesystem.

use std::path::{Path, PathBuf};

use crate::{CompileSpec, ForkOptions, ResolvedExecutable};

/// File name of the Java compiler inside a JDK's `bin` directory, without the
/// platform executable suffix.
pub const JAVAC: &str = "javac";

/// Returns the Java compiler inside the JDK rooted at `java_home`.
///
/// `bin/javac` on Unix-like platforms, `bin\javac.exe` on Windows.
pub fn javac_for_home(java_home: &Path) -> PathBuf {
    java_home
        .join("bin")
        .join(format!("{JAVAC}{}", std::env::consts::EXE_SUFFIX))
}

/// Resolves the compiler executable for `spec`.
///
/// Returns `None` when neither the spec nor its fork options name a compiler.
pub fn resolve(spec: &CompileSpec) -> Option<ResolvedExecutable> {
    match spec {
        CompileSpec::CommandLine(cmd) => Some(cmd.executable.clone()),
        CompileSpec::Generic(spec) => resolve_from_fork_options(&spec.fork_options),
    }
}

fn resolve_from_fork_options(options: &ForkOptions) -> Option<ResolvedExecutable> {
    // Empty values count as unset.
    let java_home = options
        .java_home
        .as_deref()
        .filter(|home| !home.as_os_str().is_empty());

    match java_home {
        Some(home) => ResolvedExecutable::new(javac_for_home(home)),
        None => options.executable.as_deref().and_then(ResolvedExecutable::new),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandLineCompileSpec, JavaCompileSpec};

    fn generic(executable: Option<&str>, java_home: Option<&str>) -> CompileSpec {
        let mut spec = JavaCompileSpec::new("/work");
        spec.fork_options.executable = executable.map(str::to_owned);
        spec.fork_options.java_home = java_home.map(PathBuf::from);
        CompileSpec::Generic(spec)
    }

    fn command_line(executable: &str, fork: CompileSpec) -> CompileSpec {
        CompileSpec::CommandLine(CommandLineCompileSpec {
            executable: ResolvedExecutable::new(executable).unwrap(),
            spec: fork.java_spec().clone(),
        })
    }

    #[test]
    fn command_line_executable_wins_over_fork_options() {
        let fork = generic(Some("custom-javac"), Some("/opt/jdk17"));
        let spec = command_line("/usr/bin/javac", fork);

        assert_eq!(resolve(&spec), ResolvedExecutable::new("/usr/bin/javac"));
    }

    #[test]
    fn java_home_wins_over_fork_executable() {
        let spec = generic(Some("custom-javac"), Some("/opt/jdk17"));

        let expected = Path::new("/opt/jdk17")
            .join("bin")
            .join(format!("javac{}", std::env::consts::EXE_SUFFIX));
        assert_eq!(resolve(&spec), ResolvedExecutable::new(expected));
    }

    #[cfg(unix)]
    #[test]
    fn java_home_uses_bin_javac_on_unix() {
        let resolved = resolve(&generic(None, Some("/opt/jdk17"))).unwrap();
        assert_eq!(resolved.as_path(), Path::new("/opt/jdk17/bin/javac"));
    }

    #[test]
    fn fork_executable_used_when_no_java_home() {
        let spec = generic(Some("custom-javac"), None);
        assert_eq!(resolve(&spec), ResolvedExecutable::new("custom-javac"));
    }

    #[test]
    fn nothing_configured_resolves_to_none() {
        assert_eq!(resolve(&generic(None, None)), None);
    }

    #[test]
    fn empty_values_are_treated_as_unset() {
        assert_eq!(resolve(&generic(Some(""), None)), None);
        assert_eq!(resolve(&generic(Some(""), Some(""))), None);
        assert_eq!(
            resolve(&generic(Some("custom-javac"), Some(""))),
            ResolvedExecutable::new("custom-javac"),
        );
    }

    #[test]
    fn resolution_is_repeatable() {
        for spec in [
            generic(None, None),
            generic(Some("custom-javac"), None),
            generic(Some("custom-javac"), Some("/opt/jdk17")),
            command_line("/usr/bin/javac", generic(None, Some("/opt/jdk17"))),
        ] {
            assert_eq!(resolve(&spec), resolve(&spec));
        }
    }
}
