use crate::errors::AppError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Reads a photo from disk. The bytes are passed on untouched.
pub fn read_photo<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, AppError> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.is_empty() {
        return Err(AppError::Validation(format!(
            "Photo file {} is empty",
            path.display()
        )));
    }

    debug!(path = %path.display(), size = bytes.len(), "photo loaded");
    Ok(bytes)
}
