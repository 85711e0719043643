//! Filename extraction from `Content-Disposition` response headers.

/// Name used when the server does not supply one.
pub const FALLBACK_FILE_NAME: &str = "file";

/// Extract the download filename from a `Content-Disposition` value.
///
/// Takes the text after `filename=`, up to the next `;`, with quotes
/// removed. Returns [`FALLBACK_FILE_NAME`] when the header is absent,
/// has no `filename=` parameter, or the name is empty.
pub fn filename_from_disposition(header: Option<&str>) -> String {
    let Some(value) = header else {
        return FALLBACK_FILE_NAME.to_string();
    };
    let Some((_, rest)) = value.split_once("filename=") else {
        return FALLBACK_FILE_NAME.to_string();
    };

    let raw = rest.split(';').next().unwrap_or(rest);
    let name: String = raw.chars().filter(|c| *c != '"').collect();
    let name = name.trim();

    if name.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Reduce a server-supplied name to its last path component so a saved
/// download stays inside the target directory.
pub fn safe_file_name(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .filter(|s| *s != "." && *s != "..")
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}
