//! Whole-file input and output

use crate::error::{CensusError, Result};
use std::path::{Path, PathBuf};

/// Read the whole input file into memory
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CensusError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Create the output directory, then write every rendered file.
///
/// Callers render all outputs first so a failed render never leaves
/// a partial set of files behind.
pub fn write_outputs(dir: &Path, outputs: &[(PathBuf, String)]) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| CensusError::CreateOutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for (path, content) in outputs {
        std::fs::write(path, content).map_err(|source| CensusError::WriteOutput {
            path: path.clone(),
            source,
        })?;
        tracing::info!(
            action = "write",
            file = %path.display(),
            bytes = content.len(),
            "Wrote output"
        );
    }

    Ok(())
}
