use std::ffi::OsString;
use std::io;
use std::path::Path;

use super::{EngineAdapter, OutputConvention};
use crate::domain::{EngineConfig, FileType, Result, SolverError};
use crate::format::ModelFormat;
use crate::reader::SolutionReader;

/// IBM ILOG CPLEX through the interactive optimizer in command mode.
///
/// `cplex -c "read <model>" [extra...] optimize "display solution variables -"`;
/// the transcript on standard output is the report. Each extra argument is
/// one more command (`"set timelimit 10"`) run before `optimize`.
///
/// CPLEX splits a command on whitespace, so the model path must not contain
/// any.
#[derive(Debug, Clone)]
pub struct CplexSolver {
    config: EngineConfig,
}

impl CplexSolver {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::new("cplex", FileType::Lp))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl Default for CplexSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineAdapter for CplexSolver {
    fn engine_name(&self) -> &str {
        "CPLEX"
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn model_format(&self, file_type: FileType) -> ModelFormat {
        match file_type {
            FileType::Lp => ModelFormat::Lp,
            FileType::Mps => ModelFormat::Mps,
        }
    }

    fn reader(&self) -> SolutionReader {
        SolutionReader::Cplex
    }

    fn output_convention(&self) -> OutputConvention {
        OutputConvention::Stdout
    }

    fn result_extension(&self) -> &'static str {
        "log"
    }

    fn arguments(
        &self,
        _file_type: FileType,
        model: &Path,
        _result: &Path,
        extra: &[OsString],
    ) -> Vec<OsString> {
        let mut read = OsString::from("read ");
        read.push(model);
        let mut args: Vec<OsString> = vec!["-c".into(), read];
        args.extend(extra.iter().cloned());
        args.push("optimize".into());
        args.push("display solution variables -".into());
        args
    }

    fn check_paths(&self, model: &Path, _result: &Path) -> Result<()> {
        let spaced = model
            .to_str()
            .map_or(true, |path| path.chars().any(char::is_whitespace));
        if spaced {
            let directory = model.parent().unwrap_or(model);
            return Err(SolverError::WorkingDirectory {
                path: directory.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "CPLEX cannot read a model whose path contains whitespace",
                ),
            });
        }
        Ok(())
    }
}
