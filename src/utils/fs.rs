use {
    crate::types::error::XtaskError,
    log::{debug, info},
    std::{fs, path::Path},
};

/// Removes `dir` and everything below it. A directory that does not exist is
/// already clean.
pub fn clean_directory(dir: &Path) -> Result<bool, XtaskError> {
    if !dir.exists() {
        debug!("nothing to clean at {}", dir.display());
        return Ok(false);
    }
    info!("cleaning {}", dir.display());
    fs::remove_dir_all(dir).map_err(|source| XtaskError::CleanFailed {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(true)
}
