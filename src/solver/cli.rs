//! Process orchestration shared by every engine adapter.
//!
//! One solve moves through `Idle → Prepared → Running → Parsed → Cleaned`,
//! or ends in `Failed`. The model and result files live exactly as long as
//! the [`Artifacts`] guard: it is dropped after the engine process has exited
//! and removes them on every path, error paths included, unless the caller
//! asked to keep them.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

use super::{EngineAdapter, OutputConvention};
use crate::domain::{
    Model, ModelView, ResolvedOptions, Result, SolutionStatus, SolveOptions, SolverError,
};
use crate::format::{remove_if_exists, ModelFile};

/// Prefix of auto-generated file names
const NAME_PREFIX: &str = "letsopt-";

/// Lifecycle state of one solve, reported in the `stage` log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStage {
    Idle,
    Prepared,
    Running,
    Parsed,
    Cleaned,
    Failed,
}

impl SolveStage {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStage::Idle => "idle",
            SolveStage::Prepared => "prepared",
            SolveStage::Running => "running",
            SolveStage::Parsed => "parsed",
            SolveStage::Cleaned => "cleaned",
            SolveStage::Failed => "failed",
        }
    }
}

/// Solve `model` with `adapter`, writing the outcome onto the model.
///
/// The model is only mutated once the engine has run and its report has
/// been read; every error leaves the previous result state untouched.
pub fn run<A>(adapter: &A, model: &mut Model, options: &SolveOptions) -> Result<()>
where
    A: EngineAdapter + ?Sized,
{
    let resolved = adapter.config().resolve(options);
    let engine = adapter.engine_name();
    tracing::info!(
        component = "solver",
        operation = "solve",
        stage = SolveStage::Idle.as_str(),
        engine,
        executable = %resolved.path.display(),
        file_type = %resolved.file_type,
        "Starting solve"
    );

    match execute(adapter, model, &resolved) {
        Ok(status) => {
            tracing::info!(
                component = "solver",
                operation = "solve",
                stage = SolveStage::Cleaned.as_str(),
                engine,
                status = %status,
                objective = ?model.objective_value(),
                "Solve finished"
            );
            Ok(())
        }
        Err(err) => {
            tracing::warn!(
                component = "solver",
                operation = "solve",
                stage = SolveStage::Failed.as_str(),
                engine,
                code = err.code(),
                error = %err,
                "Solve failed"
            );
            Err(err)
        }
    }
}

fn execute<A>(adapter: &A, model: &mut Model, resolved: &ResolvedOptions) -> Result<SolutionStatus>
where
    A: EngineAdapter + ?Sized,
{
    let engine = adapter.engine_name();
    let format = adapter.model_format(resolved.file_type);

    let mut artifacts = Artifacts::prepare(resolved.directory.as_deref(), resolved.delete)?;
    let stem = match &resolved.name {
        Some(name) => name.clone(),
        None => artifacts.reserve_stem(format.extension())?,
    };
    let model_path = artifacts.path().join(format!("{}.{}", stem, format.extension()));
    let result_path = artifacts
        .path()
        .join(format!("{}.{}", stem, adapter.result_extension()));
    adapter.check_paths(&model_path, &result_path)?;
    artifacts.track(&result_path);
    artifacts
        .adopt(ModelFile::new(format, &model_path))
        .write(model)?;
    // A report left by an earlier run under the same name must not be read.
    remove_if_exists(&result_path).map_err(|source| SolverError::WorkingDirectory {
        path: result_path.clone(),
        source,
    })?;
    tracing::debug!(
        component = "solver",
        operation = "prepare",
        stage = SolveStage::Prepared.as_str(),
        engine,
        format = format.name(),
        variables = model.num_variables(),
        constraints = model.num_constraints(),
        model_file = %model_path.display(),
        result_file = %result_path.display(),
        "Model file written"
    );

    let args = adapter.arguments(
        resolved.file_type,
        &model_path,
        &result_path,
        &resolved.extra_args,
    );
    spawn_and_wait(adapter, resolved, &args, &result_path)?;

    let text = read_report(&result_path);
    let solution = adapter.reader().read(&text, &ModelView::new(model));
    let status = solution.status;
    model.apply_solution(solution);
    tracing::debug!(
        component = "solver",
        operation = "parse",
        stage = SolveStage::Parsed.as_str(),
        engine,
        status = %status,
        "Engine report applied"
    );

    drop(artifacts);
    Ok(status)
}

fn spawn_and_wait<A>(
    adapter: &A,
    resolved: &ResolvedOptions,
    args: &[OsString],
    result_path: &Path,
) -> Result<()>
where
    A: EngineAdapter + ?Sized,
{
    let engine = adapter.engine_name();
    let convention = adapter.output_convention();

    let mut command = Command::new(&resolved.path);
    command.args(args).stdin(Stdio::null()).stderr(Stdio::inherit());
    match convention {
        OutputConvention::Stdout => {
            let report = File::create(result_path).map_err(|source| SolverError::WorkingDirectory {
                path: result_path.to_path_buf(),
                source,
            })?;
            command.stdout(Stdio::from(report));
        }
        OutputConvention::SolutionFile => {
            command.stdout(Stdio::piped());
        }
    }

    tracing::debug!(
        component = "solver",
        operation = "spawn",
        stage = SolveStage::Running.as_str(),
        engine,
        executable = %resolved.path.display(),
        argv = ?args,
        output = ?convention,
        "Running engine"
    );

    let child = command.spawn().map_err(|source| match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            SolverError::SolverNotAvailable {
                engine: engine.to_string(),
                path: resolved.path.clone(),
                source,
            }
        }
        _ => SolverError::ExecutionFailed(format!("cannot start {}: {}", engine, source)),
    })?;

    // Blocks until the process has exited.
    let output = child
        .wait_with_output()
        .map_err(|err| SolverError::ExecutionFailed(format!("waiting for {}: {}", engine, err)))?;

    if !output.stdout.is_empty() {
        tracing::trace!(
            component = "solver",
            operation = "spawn",
            engine,
            stdout = %String::from_utf8_lossy(&output.stdout),
            "Engine output"
        );
    }
    if !output.status.success() {
        tracing::warn!(
            component = "solver",
            operation = "spawn",
            engine,
            exit_code = ?output.status.code(),
            "Engine exited with a failure status; reading its report anyway"
        );
    }
    Ok(())
}

/// Report text, or empty text when the engine left nothing readable.
fn read_report(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            tracing::warn!(
                component = "solver",
                operation = "parse",
                result_file = %path.display(),
                error = %err,
                "Result file is missing or unreadable"
            );
            String::new()
        }
    }
}

/// Working directory and the files one solve creates in it.
struct Artifacts {
    directory: PathBuf,
    temp_dir: Option<TempDir>,
    model_file: Option<ModelFile>,
    files: Vec<PathBuf>,
    delete: bool,
}

impl Artifacts {
    /// Use `directory` (created if missing) or a fresh temporary directory.
    fn prepare(directory: Option<&Path>, delete: bool) -> Result<Self> {
        let (directory, temp_dir) = match directory {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|source| SolverError::WorkingDirectory {
                    path: dir.to_path_buf(),
                    source,
                })?;
                (dir.to_path_buf(), None)
            }
            None => {
                let temp = tempfile::Builder::new()
                    .prefix(NAME_PREFIX)
                    .tempdir()
                    .map_err(|source| SolverError::WorkingDirectory {
                        path: std::env::temp_dir(),
                        source,
                    })?;
                (temp.path().to_path_buf(), Some(temp))
            }
        };
        Ok(Self {
            directory,
            temp_dir,
            model_file: None,
            files: Vec::new(),
            delete,
        })
    }

    fn path(&self) -> &Path {
        &self.directory
    }

    /// Claim a unique base name by creating the model file under it.
    fn reserve_stem(&mut self, extension: &str) -> Result<String> {
        let suffix = format!(".{}", extension);
        let io_error = |source: io::Error| SolverError::WorkingDirectory {
            path: self.directory.clone(),
            source,
        };
        let placeholder = tempfile::Builder::new()
            .prefix(NAME_PREFIX)
            .suffix(&suffix)
            .tempfile_in(&self.directory)
            .map_err(io_error)?;
        let path = placeholder.into_temp_path().keep().map_err(|err| io_error(err.error))?;
        self.track(&path);

        let stem = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(suffix.as_str()))
            .map(str::to_string);
        stem.ok_or_else(|| {
            SolverError::ExecutionFailed(format!("generated file name '{}' is not valid UTF-8", path.display()))
        })
    }

    /// Take ownership of the model file; it is deleted through [`ModelFile::delete`].
    fn adopt(&mut self, file: ModelFile) -> &ModelFile {
        self.model_file.insert(file)
    }

    fn track(&mut self, path: &Path) {
        if !self.files.iter().any(|p| p == path) {
            self.files.push(path.to_path_buf());
        }
    }
}

impl Drop for Artifacts {
    fn drop(&mut self) {
        if !self.delete {
            if let Some(temp) = self.temp_dir.take() {
                let _ = temp.keep();
            }
            tracing::debug!(
                component = "solver",
                operation = "cleanup",
                directory = %self.directory.display(),
                "Keeping model and result files"
            );
            return;
        }

        if let Some(model_file) = &self.model_file {
            if let Err(err) = model_file.delete() {
                tracing::warn!(
                    component = "solver",
                    operation = "cleanup",
                    path = %model_file.path().display(),
                    error = %err,
                    "Failed to remove model file"
                );
            }
        }
        for path in &self.files {
            if let Err(err) = remove_if_exists(path) {
                tracing::warn!(
                    component = "solver",
                    operation = "cleanup",
                    path = %path.display(),
                    error = %err,
                    "Failed to remove solve artifact"
                );
            }
        }
        if let Some(temp) = self.temp_dir.take() {
            if let Err(err) = temp.close() {
                tracing::warn!(
                    component = "solver",
                    operation = "cleanup",
                    directory = %self.directory.display(),
                    error = %err,
                    "Failed to remove temporary directory"
                );
            }
        }
        tracing::debug!(
            component = "solver",
            operation = "cleanup",
            stage = SolveStage::Cleaned.as_str(),
            directory = %self.directory.display(),
            "Removed solve artifacts"
        );
    }
}
