//! File-to-text extraction. Produces one complete string per file; the
//! reader only ever sees the result after extraction succeeded.

use std::{fs, io, path::Path, path::PathBuf};

use log::info;
use thiserror::Error;

use super::markup::strip_markup;

#[derive(Debug, Error)]
pub(super) enum ExtractError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unsupported file format `{extension}`: {hint}")]
    Unsupported {
        extension: String,
        hint: &'static str,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SourceKind {
    PlainText,
    Markup,
}

fn source_kind(extension: &str) -> Result<SourceKind, ExtractError> {
    let unsupported = |hint| ExtractError::Unsupported {
        extension: extension.to_owned(),
        hint,
    };

    match extension {
        "txt" | "text" | "md" | "markdown" => Ok(SourceKind::PlainText),
        "html" | "htm" | "xhtml" => Ok(SourceKind::Markup),
        "pdf" => Err(unsupported("export the PDF to plain text first")),
        "docx" | "doc" | "odt" | "rtf" => {
            Err(unsupported("save the document as plain text first"))
        }
        "" => Err(unsupported("add a .txt, .md or .html extension")),
        _ => Err(unsupported("supported formats are .txt, .md and .html")),
    }
}

pub(super) fn extract_text_from_file(path: &Path) -> Result<String, ExtractError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let kind = source_kind(&extension)?;

    let bytes = fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = String::from_utf8_lossy(&bytes);

    let text = match kind {
        SourceKind::PlainText => raw.into_owned(),
        SourceKind::Markup => strip_markup(&raw),
    };

    info!(
        "extract: {} ({:?}) -> {} bytes of text",
        path.display(),
        kind,
        text.len()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let dir = env::temp_dir().join(format!("monkeyread-extract-{}", process::id()));
        fs::create_dir_all(&dir).expect("create scratch dir");
        let path = dir.join(name);
        fs::write(&path, contents).expect("write scratch file");
        path
    }

    #[test]
    fn reads_plain_text_verbatim() {
        let path = scratch_file("plain.TXT", b"Hello  world.\nBye");
        assert_eq!(extract_text_from_file(&path).unwrap(), "Hello  world.\nBye");
    }

    #[test]
    fn flattens_html() {
        let path = scratch_file("page.html", b"<p>One</p><p>Two &amp; three</p>");
        assert_eq!(extract_text_from_file(&path).unwrap(), "One\nTwo & three");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let path = scratch_file("latin.txt", b"caf\xe9 ok");
        assert_eq!(extract_text_from_file(&path).unwrap(), "caf\u{FFFD} ok");
    }

    #[test]
    fn rejects_binary_document_formats() {
        let err = extract_text_from_file(Path::new("book.pdf")).unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported { ref extension, .. } if extension == "pdf"));
        assert_eq!(
            err.to_string(),
            "unsupported file format `pdf`: export the PDF to plain text first"
        );

        let err = extract_text_from_file(Path::new("notes")).unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = extract_text_from_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
        assert!(err.to_string().starts_with("could not read /definitely/not/here.txt"));
    }
}
