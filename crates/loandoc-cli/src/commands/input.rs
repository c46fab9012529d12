//! Loading source documents from disk.
//!
//! Decoding word-processing files is left to the tool that produced the
//! text; this reads its plain-text or JSON output.

use std::fs;
use std::path::Path;

use loandoc_core::SourceDocument;

/// File extensions accepted as input.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "json"];

/// Lower-cased extension of `path`.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_supported(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension_of(path).as_str())
}

/// Read a source document.
///
/// `.txt` files hold one paragraph per line; `.json` files hold a
/// serialized [`SourceDocument`].
pub fn load_source(path: &Path) -> anyhow::Result<SourceDocument> {
    let extension = extension_of(path);

    match extension.as_str() {
        "txt" => {
            let text = fs::read_to_string(path)?;
            Ok(SourceDocument::from_plain_text(&text))
        }
        "json" => {
            let json = fs::read_to_string(path)?;
            SourceDocument::from_json(&json)
                .map_err(|e| anyhow::anyhow!("Invalid source document {}: {}", path.display(), e))
        }
        "docx" | "doc" => anyhow::bail!(
            "Word files are not decoded directly: export {} to .txt (one paragraph per line) or .json first",
            path.display()
        ),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}
