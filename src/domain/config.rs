//! Engine and per-call solve configuration.
//!
//! An adapter carries an [`EngineConfig`] with its defaults; each solve call
//! may pass [`SolveOptions`]. A field set on the call wins over the adapter
//! default, which wins over the built-in default. Extra arguments are never
//! replaced: the adapter's come first, the call's are appended after them.

use std::ffi::OsString;
use std::path::PathBuf;

use super::value_objects::FileType;

/// Adapter-level configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Executable path or bare name resolved through `PATH`.
    pub path: PathBuf,
    /// Dialect used when a call does not ask for one.
    pub file_type: FileType,
    /// Working directory; `None` means a fresh temporary directory per solve.
    pub directory: Option<PathBuf>,
    /// Remove the model and result files after the solve.
    pub delete: bool,
    /// Passed verbatim to the engine on every solve.
    pub extra_args: Vec<OsString>,
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            file_type,
            directory: None,
            delete: true,
            extra_args: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_file_type(mut self, file_type: FileType) -> Self {
        self.file_type = file_type;
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_delete(mut self, delete: bool) -> Self {
        self.delete = delete;
        self
    }

    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Merge call-site options over this configuration.
    pub fn resolve(&self, options: &SolveOptions) -> ResolvedOptions {
        let mut extra_args = self.extra_args.clone();
        extra_args.extend(options.extra_args.iter().cloned());

        ResolvedOptions {
            path: self.path.clone(),
            file_type: options.file_type.unwrap_or(self.file_type),
            directory: options.directory.clone().or_else(|| self.directory.clone()),
            name: options.name.clone(),
            delete: options.delete.unwrap_or(self.delete),
            extra_args,
        }
    }
}

/// Per-call overrides. Every unset field falls back to the adapter's [`EngineConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveOptions {
    pub directory: Option<PathBuf>,
    /// Base name of the model and result files; auto-generated when unset.
    pub name: Option<String>,
    pub delete: Option<bool>,
    pub file_type: Option<FileType>,
    pub extra_args: Vec<OsString>,
}

impl SolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_delete(mut self, delete: bool) -> Self {
        self.delete = Some(delete);
        self
    }

    pub fn with_file_type(mut self, file_type: FileType) -> Self {
        self.file_type = Some(file_type);
        self
    }

    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Options after merging, as the orchestrator consumes them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub path: PathBuf,
    pub file_type: FileType,
    pub directory: Option<PathBuf>,
    pub name: Option<String>,
    pub delete: bool,
    pub extra_args: Vec<OsString>,
}
