//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging, for example, a
//! [`ConfigurationName`] with a [`ModuleId`] even though both are strings under
//! the hood.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single compiler invocation (one call to `compile`).
///
/// Generated fresh for every invocation and passed to every observability
/// event so all activity from one compiler run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Generates a new random invocation identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed (dependency graph names)
// ---------------------------------------------------------------------------

string_id! {
    /// Names a configuration (variant) of a module in a dependency graph,
    /// e.g. `"runtimeElements"` or `"compile"`.
    ConfigurationName
}

string_id! {
    /// Identifies a module in a dependency graph, usually in
    /// `"group:name:version"` form (e.g. `"org.example:lib:1.0"`).
    ModuleId
}

// ---------------------------------------------------------------------------
// Resolved executable
// ---------------------------------------------------------------------------

/// The compiler binary selected for one invocation: a bare command name
/// (looked up on `PATH` by the platform) or a path.
///
/// Never empty. The only way to obtain one is [`ResolvedExecutable::new`],
/// which rejects empty input, so an empty string can never reach the process
/// launcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PathBuf", into = "PathBuf")]
pub struct ResolvedExecutable(PathBuf);

impl ResolvedExecutable {
    /// Creates a [`ResolvedExecutable`], returning `None` if `value` is empty.
    pub fn new(value: impl Into<PathBuf>) -> Option<Self> {
        let v = value.into();
        if v.as_os_str().is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the executable as a path.
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<PathBuf> for ResolvedExecutable {
    type Error = &'static str;

    fn try_from(value: PathBuf) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("executable must not be empty")
    }
}

impl From<ResolvedExecutable> for PathBuf {
    fn from(value: ResolvedExecutable) -> Self {
        value.0
    }
}

impl std::fmt::Display for ResolvedExecutable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
