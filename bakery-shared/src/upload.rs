/// Gallery upload filename policy
///
/// Uploaded images are stored in a single flat directory. Before a file is
/// written its client-supplied name is checked against the extension
/// allow-list, reduced to a safe ASCII form, and prefixed with the upload
/// timestamp (`%Y%m%d_%H%M%S_`).
///
/// # Example
///
/// ```
/// use bakery_shared::upload::stored_filename;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
/// let name = stored_filename("Wedding Cake.PNG", at).unwrap();
/// assert_eq!(name, "20240501_093000_Wedding_Cake.PNG");
/// ```

use chrono::{DateTime, Utc};

/// Image extensions accepted for gallery uploads (compared case-insensitively)
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Timestamp prefix format applied to stored filenames
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Longest stored filename, matching `gallery.image_path`
pub const MAX_STORED_LEN: usize = 255;

/// Error type for upload filename checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// No filename was supplied
    #[error("No file selected")]
    MissingFile,

    /// Extension is not in [`ALLOWED_EXTENSIONS`]
    #[error("Invalid file type")]
    DisallowedExtension,
}

/// Returns true if `filename` has an allowed image extension
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Reduces a client filename to a safe, flat ASCII name
///
/// Path components are dropped, whitespace becomes `_`, and anything other
/// than ASCII alphanumerics, `.`, `-` and `_` is removed. Leading and
/// trailing dots and underscores are trimmed so the result can never be a
/// hidden file or a relative path.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let mut cleaned = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_whitespace() {
            cleaned.push('_');
        } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            cleaned.push(c);
        }
    }

    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Validates and converts a client filename into the name stored on disk
///
/// # Errors
///
/// - `UploadError::MissingFile` if the name is empty
/// - `UploadError::DisallowedExtension` if the extension is not allowed, or if
///   nothing usable remains after sanitising
///
/// Long names keep their extension and lose the end of their stem so the
/// result fits in [`MAX_STORED_LEN`] bytes.
pub fn stored_filename(filename: &str, now: DateTime<Utc>) -> Result<String, UploadError> {
    if filename.trim().is_empty() {
        return Err(UploadError::MissingFile);
    }
    if !allowed_file(filename) {
        return Err(UploadError::DisallowedExtension);
    }

    let safe = sanitize_filename(filename);
    if !allowed_file(&safe) {
        return Err(UploadError::DisallowedExtension);
    }

    let prefix = format!("{}_", now.format(TIMESTAMP_FORMAT));
    let room = MAX_STORED_LEN - prefix.len();
    let safe = match safe.rsplit_once('.') {
        // Sanitised names are ASCII, so byte slicing stays on char boundaries
        Some((stem, ext)) if safe.len() > room => {
            format!("{}.{}", &stem[..room - ext.len() - 1], ext)
        }
        _ => safe,
    };

    Ok(format!("{}{}", prefix, safe))
}
