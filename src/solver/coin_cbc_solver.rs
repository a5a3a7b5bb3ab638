use std::ffi::OsString;
use std::path::Path;

use super::{EngineAdapter, OutputConvention};
use crate::domain::{EngineConfig, FileType};
use crate::format::ModelFormat;
use crate::reader::SolutionReader;

/// COIN-OR CBC through its `cbc` command line.
///
/// `cbc <model> [extra...] -solve -solution <result>`; CBC detects the
/// dialect from the file extension. CBC acts on its arguments in order, so
/// extra options such as `-sec` go in front of `-solve`.
#[derive(Debug, Clone)]
pub struct CoinCbcSolver {
    config: EngineConfig,
}

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::new("cbc", FileType::Lp))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineAdapter for CoinCbcSolver {
    fn engine_name(&self) -> &str {
        "COIN-OR CBC"
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
        SolutionReader::Cbc
    }

    fn output_convention(&self) -> OutputConvention {
        OutputConvention::SolutionFile
    }

    fn arguments(
        &self,
        _file_type: FileType,
        model: &Path,
        result: &Path,
        extra: &[OsString],
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![model.into()];
        args.extend(extra.iter().cloned());
        args.push("-solve".into());
        args.push("-solution".into());
        args.push(result.into());
        args
    }
}
