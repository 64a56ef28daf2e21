// utils/image_utils.rs
use std::path::Path;

/// Root for property gallery uploads.
pub const GALLERY_ROOT: &str = "fotogalerie";

/// Root for equipment icons.
pub const SYMBOLS_ROOT: &str = "symbols";

/// Longest stored image reference, root and directories included.
pub const IMAGE_PATH_MAX_CHARS: usize = 100;

pub fn image_path_fits(stored_path: &str) -> bool {
    stored_path.chars().count() <= IMAGE_PATH_MAX_CHARS
}

/// Final path component of an uploaded filename, so client-supplied
/// directories never leak into the stored path.
pub fn clean_filename(filename: &str) -> Option<&str> {
    let name = Path::new(filename.trim())
        .file_name()
        .and_then(|name| name.to_str())?;
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}

/// `fotogalerie/<property-id>/<filename>`
pub fn gallery_path(property_id: i64, filename: &str) -> Option<String> {
    clean_filename(filename).map(|name| format!("{}/{}/{}", GALLERY_ROOT, property_id, name))
}

/// `symbols/<filename>`
pub fn symbol_path(filename: &str) -> Option<String> {
    clean_filename(filename).map(|name| format!("{}/{}", SYMBOLS_ROOT, name))
}

/// Public URL of a stored image reference.
pub fn media_url(media_prefix: &str, stored_path: &str) -> String {
    format!(
        "{}/{}",
        media_prefix.trim_end_matches('/'),
        stored_path.trim_start_matches('/')
    )
}
