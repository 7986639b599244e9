use std::path::Path;

/// Declared media type for an image path, per the upload contract:
/// `.png` is `image/png`, everything else is treated as JPEG.
pub fn media_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
        _ => "image/jpeg",
    }
}

/// Infer a camera id from an image file stem.
///
/// Camera images are named `<STATE>_<ID>_...` (e.g. `MN_C30038_20260131.jpg`),
/// except turnpike truck-park captures which carry a three-segment id
/// (`NY_TA_195_truckpark.png`).
pub fn camera_id_from_stem(stem: &str) -> String {
    let segments = if stem.contains("truckpark") { 3 } else { 2 };
    stem.split('_')
        .take(segments)
        .collect::<Vec<_>>()
        .join("_")
}

/// Truncate to a character budget, so long free-text fields stay within a
/// bounded prompt size. Cuts on a char boundary, never mid-codepoint.
pub fn truncate_chars(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
