// src/utils/text_debug.rs
use crate::extractors::numbers::detect_table_boundaries;
use crate::utils::error::AppError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Saves a page's text with an inline `<<table@offset>>` marker at each
/// detected table boundary, preceded by a short header listing the raw
/// offsets. Useful for eyeballing why the ambient scale changed where it
/// did.
pub fn save_debug_page(text: &str, filename: &str) -> Result<(), AppError> {
    let boundaries = detect_table_boundaries(text);

    let mut annotated = String::with_capacity(text.len() + boundaries.len() * 24 + 64);
    annotated.push_str(&format!("table boundaries: {boundaries:?}\n---\n"));

    let mut last_pos = 0;
    for &offset in &boundaries {
        annotated.push_str(&text[last_pos..offset]);
        annotated.push_str(&format!("<<table@{offset}>>"));
        last_pos = offset;
    }
    annotated.push_str(&text[last_pos..]);

    let path = Path::new(filename);
    let mut file = File::create(path)?;
    file.write_all(annotated.as_bytes())?;

    tracing::info!("Saved debug page text to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_dump_marks_each_boundary() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("page_0001.txt");
        let text = "header in millions\nFY 2024 table\nvalues 1 2 3\nFiscal Year recap\n";

        save_debug_page(text, &path.to_string_lossy()).expect("dump written");

        let written = std::fs::read_to_string(&path).expect("dump readable");
        assert!(written.starts_with("table boundaries: ["));
        assert_eq!(written.matches("<<table@").count(), 2);
        assert!(written.contains("values 1 2 3"));
    }
}
