//! Compile spec loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use compile::{CommandLineCompileSpec, CompileSpec, ResolvedExecutable};

/// Reads a JSON compile spec from `path`.
pub fn load_spec(path: &Path) -> Result<CompileSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading compile spec {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsing compile spec {}", path.display()))
}

/// Turns `spec` into a command-line spec running `executable`, if one is given.
pub fn with_executable(spec: CompileSpec, executable: Option<PathBuf>) -> Result<CompileSpec> {
    let Some(executable) = executable else {
        return Ok(spec);
    };
    let executable =
        ResolvedExecutable::new(executable).context("--executable must not be empty")?;
    let spec = match spec {
        CompileSpec::Generic(spec) => spec,
        CompileSpec::CommandLine(cmd) => cmd.spec,
    };
    Ok(CompileSpec::CommandLine(CommandLineCompileSpec { executable, spec }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_spec_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.json");
        let json = r#"{
            "kind": "generic",
            "working_dir": "/work",
            "fork_options": { "executable": "javac" }
        }"#;
        std::fs::write(&path, json).unwrap();

        let spec = load_spec(&path).unwrap();

        assert_eq!(spec.fork_options().executable.as_deref(), Some("javac"));
    }

    #[test]
    fn unreadable_spec_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = load_spec(&path).unwrap_err();

        assert!(format!("{err:#}").contains("missing.json"));
    }

    #[test]
    fn executable_override_wraps_the_spec() {
        let spec = CompileSpec::Generic(compile::JavaCompileSpec::new("/work"));

        let spec = with_executable(spec, Some("/usr/bin/javac".into())).unwrap();

        let expected = ResolvedExecutable::new("/usr/bin/javac");
        assert_eq!(compile::resolve(&spec), expected);
        assert_eq!(spec.working_dir(), Path::new("/work"));
    }

    #[test]
    fn empty_executable_override_is_rejected() {
        let spec = CompileSpec::Generic(compile::JavaCompileSpec::new("/work"));
        assert!(with_executable(spec, Some(PathBuf::new())).is_err());
    }
}
