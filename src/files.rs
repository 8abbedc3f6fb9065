//! File Uploads
//!
//! Files are sent to the backend inline, as base64 data URLs read with `FileReader`.

use thiserror::Error;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader};

use crate::api::js_message;
use crate::config;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FileError {
    #[error("{name} is larger than {limit_mb} MB")]
    TooLarge { name: String, limit_mb: u32 },

    #[error("Could not read {name}: {reason}")]
    Read { name: String, reason: String },
}

pub(crate) fn check_size(name: &str, size_bytes: f64, limit_mb: u32) -> Result<(), FileError> {
    if size_bytes > f64::from(limit_mb) * 1024.0 * 1024.0 {
        return Err(FileError::TooLarge { name: name.to_string(), limit_mb });
    }
    Ok(())
}

/// Read `file` as `data:<mime>;base64,...`
pub async fn read_as_data_url(file: &File) -> Result<String, FileError> {
    let name = file.name();
    check_size(&name, file.size(), config::current().max_upload_mb)?;

    let read_error = |reason: String| FileError::Read { name: name.clone(), reason };

    let reader = FileReader::new().map_err(|e| read_error(js_message(&e)))?;
    let done = js_sys::Promise::new(&mut |resolve, reject| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });
    reader.read_as_data_url(file).map_err(|e| read_error(js_message(&e)))?;
    JsFuture::from(done).await.map_err(|e| read_error(js_message(&e)))?;

    let url = reader
        .result()
        .map_err(|e| read_error(js_message(&e)))?
        .as_string()
        .ok_or_else(|| read_error("reader returned no text".into()))?;
    log::debug!("[FILES] Read {} ({} chars)", name, url.len());
    Ok(url)
}

/// First file selected in an `<input type="file">`
pub fn selected_file(input: &web_sys::HtmlInputElement) -> Option<File> {
    input.files().and_then(|list| list.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limit() {
        assert!(check_size("a.pdf", 1024.0, 5).is_ok());
        assert!(check_size("a.pdf", 5.0 * 1024.0 * 1024.0, 5).is_ok());
        assert_eq!(
            check_size("scan.pdf", 5.0 * 1024.0 * 1024.0 + 1.0, 5),
            Err(FileError::TooLarge { name: "scan.pdf".into(), limit_mb: 5 })
        );
    }

    #[test]
    fn test_error_display() {
        let err = FileError::TooLarge { name: "scan.pdf".into(), limit_mb: 5 };
        assert_eq!(err.to_string(), "scan.pdf is larger than 5 MB");
    }
}
