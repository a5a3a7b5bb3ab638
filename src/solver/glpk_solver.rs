use std::ffi::OsString;
use std::path::Path;

use super::{EngineAdapter, OutputConvention};
use crate::domain::{EngineConfig, FileType};
use crate::format::ModelFormat;
use crate::reader::SolutionReader;

/// GNU Linear Programming Kit through `glpsol`.
#[derive(Debug, Clone)]
pub struct GlpkSolver {
    config: EngineConfig,
}

impl GlpkSolver {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::new("glpsol", FileType::Lp))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl Default for GlpkSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineAdapter for GlpkSolver {
    fn engine_name(&self) -> &str {
        "GLPK"
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
        SolutionReader::Glpk
    }

    fn output_convention(&self) -> OutputConvention {
        OutputConvention::SolutionFile
    }

    fn arguments(
        &self,
        file_type: FileType,
        model: &Path,
        result: &Path,
        extra: &[OsString],
    ) -> Vec<OsString> {
        let flag = match file_type {
            FileType::Lp => "--lp",
            FileType::Mps => "--mps",
        };
        let mut args: Vec<OsString> = vec![flag.into(), model.into(), "-o".into(), result.into()];
        args.extend(extra.iter().cloned());
        args
    }
}
