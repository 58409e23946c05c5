/// File handling utilities
///
/// This module validates and reads report files before parsing. Reports are
/// plain UTF-8 text; a file that cannot be decoded is the one condition that
/// propagates as an error to the caller.

use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};

/// File extensions accepted as report input
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt"];

/// Maximum accepted report size in megabytes
pub const MAX_FILE_SIZE_MB: u64 = 10;

/// Errors raised by the file-handling layer
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File type not allowed for {name}. Allowed types: .txt")]
    UnsupportedType { name: String },

    #[error("File size ({size_mb:.2} MB) exceeds maximum allowed size ({limit_mb} MB)")]
    TooLarge { size_mb: f64, limit_mb: u64 },

    #[error("Failed to read file {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("File {name} is not valid UTF-8 text")]
    InvalidUtf8 { name: String },
}

/// Validate a report file's extension and size.
///
/// # Arguments
///
/// * `path` - Path to the candidate report file
///
/// # Returns
///
/// `Ok(())` if the file is acceptable, otherwise the validation failure
pub fn validate_report_file(path: &Path) -> Result<(), FileError> {
    let name = display_name(path);

    let extension_ok = path
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false);

    if !extension_ok {
        warn!("Rejecting {}: unsupported extension", name);
        return Err(FileError::UnsupportedType { name });
    }

    let metadata = fs::metadata(path).map_err(|source| FileError::Io {
        name: name.clone(),
        source,
    })?;

    let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);
    if metadata.len() > MAX_FILE_SIZE_MB * 1024 * 1024 {
        warn!("Rejecting {}: {:.2} MB exceeds limit", name, size_mb);
        return Err(FileError::TooLarge {
            size_mb,
            limit_mb: MAX_FILE_SIZE_MB,
        });
    }

    Ok(())
}

/// Read a report file as UTF-8 text.
///
/// # Arguments
///
/// * `path` - Path to the report file
///
/// # Returns
///
/// The decoded text, or a `FileError` for I/O or decoding failures
pub fn read_report_text(path: &Path) -> Result<String, FileError> {
    let name = display_name(path);

    let bytes = fs::read(path).map_err(|source| FileError::Io {
        name: name.clone(),
        source,
    })?;

    let text = String::from_utf8(bytes).map_err(|_| FileError::InvalidUtf8 { name: name.clone() })?;

    info!("Read {} ({} bytes)", name, text.len());
    Ok(text)
}

/// Filename component of a path, for error messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_txt() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "Saccades:\nLatency: 210.5 msec\n").unwrap();

        assert!(validate_report_file(&path).is_ok());
    }

    #[test]
    fn test_validate_rejects_other_extensions() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, "not a report").unwrap();

        match validate_report_file(&path) {
            Err(FileError::UnsupportedType { name }) => assert_eq!(name, "report.pdf"),
            other => panic!("Expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_missing_file_is_io_error() {
        let path = Path::new("definitely/not/here.txt");
        assert!(matches!(
            validate_report_file(path),
            Err(FileError::Io { .. })
        ));
    }

    #[test]
    fn test_read_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [0xFF, 0xFE, 0x00, 0x41]).unwrap();

        assert!(matches!(
            read_report_text(&path),
            Err(FileError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn test_read_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "Gain: 0.95\n").unwrap();

        let text = read_report_text(&path).unwrap();
        assert_eq!(text, "Gain: 0.95\n");
    }
}
