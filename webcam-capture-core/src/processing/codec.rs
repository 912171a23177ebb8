/// Pick the first candidate the platform confirms it can encode.
///
/// `probe` answers `Some(true)` / `Some(false)`, or `None` when the platform
/// cannot be asked. Unanswerable probes count as unsupported, so a platform
/// with no probing at all gets `fallback`.
pub fn select_mime_type<F>(candidates: &[String], fallback: &str, probe: F) -> String
where
    F: Fn(&str) -> Option<bool>,
{
    for candidate in candidates {
        match probe(candidate) {
            Some(true) => {
                log::debug!("Selected encoder mime type {}", candidate);
                return candidate.clone();
            }
            Some(false) => {}
            None => log::debug!("Mime support for {} cannot be queried", candidate),
        }
    }
    log::debug!("No candidate mime type confirmed, using {}", fallback);
    fallback.to_string()
}

/// File extension for a container mime type, ignoring codec parameters.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    let container = mime_type.split(';').next().unwrap_or("").trim();
    match container.to_ascii_lowercase().as_str() {
        "video/webm" | "audio/webm" => "webm",
        "video/mp4" | "audio/mp4" => "mp4",
        "video/ogg" | "audio/ogg" => "ogg",
        "video/x-matroska" => "mkv",
        _ => "bin",
    }
}
