use std::ffi::OsString;
use std::path::Path;

use super::{EngineAdapter, OutputConvention};
use crate::domain::{EngineConfig, FileType};
use crate::format::ModelFormat;
use crate::reader::SolutionReader;

/// lp_solve command-line driver.
///
/// Reads MPS by default. The `lp` file type is lp_solve's own LP dialect, not
/// the CPLEX one.
#[derive(Debug, Clone)]
pub struct LpSolveSolver {
    config: EngineConfig,
}

impl LpSolveSolver {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::new("lp_solve", FileType::Mps))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl Default for LpSolveSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineAdapter for LpSolveSolver {
    fn engine_name(&self) -> &str {
        "lp_solve"
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn model_format(&self, file_type: FileType) -> ModelFormat {
        match file_type {
            FileType::Lp => ModelFormat::LpSolve,
            FileType::Mps => ModelFormat::Mps,
        }
    }

    fn reader(&self) -> SolutionReader {
        SolutionReader::LpSolve
    }

    fn output_convention(&self) -> OutputConvention {
        OutputConvention::Stdout
    }

    fn result_extension(&self) -> &'static str {
        "log"
    }

    fn arguments(
        &self,
        file_type: FileType,
        model: &Path,
        _result: &Path,
        extra: &[OsString],
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = match file_type {
            FileType::Lp => vec![model.into()],
            FileType::Mps => vec!["-mps".into(), model.into()],
        };
        args.extend(extra.iter().cloned());
        args
    }
}
