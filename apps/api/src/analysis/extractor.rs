//! Text Extractor: turns an uploaded document into plain text.
//!
//! PDFs are read page by page in document order and joined with `\n`.
//! Pages without a text layer (scanned images) contribute an empty segment.
//! There is no OCR fallback.

use std::path::Path;

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not read document: {0}")]
    Unreadable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    PlainText,
}

impl MediaType {
    /// Resolves the media type of an upload.
    ///
    /// The declared content type wins. The file extension is only consulted
    /// when the browser sent nothing useful (`application/octet-stream` or no
    /// header at all).
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Result<Self, ExtractError> {
        let essence = content_type
            .map(|ct| ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty());

        match essence.as_deref() {
            Some("application/pdf") => return Ok(MediaType::Pdf),
            Some("text/plain") => return Ok(MediaType::PlainText),
            Some("application/octet-stream") | None => {}
            Some(other) => return Err(ExtractError::UnsupportedFormat(other.to_string())),
        }

        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(MediaType::Pdf),
            Some("txt") => Ok(MediaType::PlainText),
            Some(other) => Err(ExtractError::UnsupportedFormat(format!(".{other}"))),
            None => Err(ExtractError::UnsupportedFormat(
                file_name.unwrap_or("unnamed upload").to_string(),
            )),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Pdf => "pdf",
            MediaType::PlainText => "text",
        }
    }
}

/// An uploaded artifact. Read exactly once, never persisted.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: Option<String>,
    pub media_type: MediaType,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(file_name: Option<String>, media_type: MediaType, bytes: Bytes) -> Self {
        Self {
            file_name,
            media_type,
            bytes,
        }
    }

    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("upload")
    }
}

/// Extracts the plain-text content of a document.
/// A zero-byte upload yields an empty string for either media type.
pub fn extract(document: &Document) -> Result<String, ExtractError> {
    if document.bytes.is_empty() {
        return Ok(String::new());
    }

    match document.media_type {
        MediaType::Pdf => {
            let pages = pdf_extract::extract_text_from_mem_by_pages(&document.bytes).map_err(|e| {
                ExtractError::Unreadable(format!(
                    "'{}' is not a readable PDF: {e}",
                    document.display_name()
                ))
            })?;
            Ok(join_pages(pages))
        }
        MediaType::PlainText => String::from_utf8(document.bytes.to_vec()).map_err(|e| {
            ExtractError::Unreadable(format!(
                "'{}' is not valid UTF-8 text: {e}",
                document.display_name()
            ))
        }),
    }
}

/// Runs [`extract`] on the blocking pool. The PDF parser is CPU bound and may
/// panic on hostile input; a panic is reported as `Unreadable`.
pub async fn extract_blocking(document: Document) -> Result<String, ExtractError> {
    let name = document.display_name().to_string();
    tokio::task::spawn_blocking(move || extract(&document))
        .await
        .map_err(|e| ExtractError::Unreadable(format!("'{name}' could not be processed: {e}")))?
}

fn join_pages(pages: Vec<String>) -> String {
    pages.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_PAGES_PDF: &[u8] = include_bytes!("../../tests/fixtures/three_pages.pdf");

    fn pdf_doc(content: &'static [u8]) -> Document {
        Document::new(
            Some("resume.pdf".to_string()),
            MediaType::Pdf,
            Bytes::from_static(content),
        )
    }

    fn text_doc(content: &'static [u8]) -> Document {
        Document::new(
            Some("jd.txt".to_string()),
            MediaType::PlainText,
            Bytes::from_static(content),
        )
    }

    #[test]
    fn test_detect_pdf_from_content_type() {
        let media = MediaType::detect(Some("application/pdf"), Some("resume.bin")).unwrap();
        assert_eq!(media, MediaType::Pdf);
    }

    #[test]
    fn test_detect_text_with_charset_parameter() {
        let media = MediaType::detect(Some("text/plain; charset=utf-8"), None).unwrap();
        assert_eq!(media, MediaType::PlainText);
    }

    #[test]
    fn test_detect_falls_back_to_extension_for_octet_stream() {
        let media = MediaType::detect(Some("application/octet-stream"), Some("Resume.PDF")).unwrap();
        assert_eq!(media, MediaType::Pdf);
        let media = MediaType::detect(None, Some("jd.txt")).unwrap();
        assert_eq!(media, MediaType::PlainText);
    }

    #[test]
    fn test_detect_rejects_docx() {
        let err = MediaType::detect(
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            Some("resume.docx"),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_detect_rejects_unknown_extension() {
        let err = MediaType::detect(None, Some("resume.xyz")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ref s) if s == ".xyz"));
    }

    #[test]
    fn test_detect_rejects_missing_type_and_name() {
        assert!(MediaType::detect(None, None).is_err());
    }

    #[test]
    fn test_extract_plain_text_verbatim() {
        let doc = text_doc(b"Looking for Rust systems engineer");
        assert_eq!(extract(&doc).unwrap(), "Looking for Rust systems engineer");
    }

    #[test]
    fn test_extract_empty_text_file_is_empty_string() {
        assert_eq!(extract(&text_doc(b"")).unwrap(), "");
    }

    #[test]
    fn test_extract_empty_pdf_is_empty_string() {
        let doc = Document::new(Some("blank.pdf".to_string()), MediaType::Pdf, Bytes::new());
        assert_eq!(extract(&doc).unwrap(), "");
    }

    #[test]
    fn test_extract_invalid_utf8_is_unreadable() {
        let err = extract(&text_doc(&[0xff, 0xfe, 0x00, 0x41])).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable(_)));
    }

    #[tokio::test]
    async fn test_extract_garbage_pdf_is_unreadable() {
        let result = extract_blocking(pdf_doc(b"this is not a pdf")).await;
        assert!(matches!(result, Err(ExtractError::Unreadable(_))));
    }

    #[test]
    fn test_extract_pdf_pages_in_document_order() {
        let text = extract(&pdf_doc(THREE_PAGES_PDF)).unwrap();
        let first = text.find("Kubernetes").expect("page one text");
        let last = text.find("Terraform").expect("page three text");
        assert!(first < last);
        assert!(text[first..last].contains('\n'));
    }

    #[test]
    fn test_extract_pdf_joins_pages_with_newline_and_keeps_blank_page() {
        let pages = pdf_extract::extract_text_from_mem_by_pages(THREE_PAGES_PDF).unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("Kubernetes"));
        assert!(pages[1].trim().is_empty());
        assert!(pages[2].contains("Terraform"));

        assert_eq!(extract(&pdf_doc(THREE_PAGES_PDF)).unwrap(), pages.join("\n"));
    }

    #[tokio::test]
    async fn test_extract_blocking_reads_real_pdf() {
        let text = extract_blocking(pdf_doc(THREE_PAGES_PDF)).await.unwrap();
        assert!(text.contains("Kubernetes"));
        assert!(text.contains("Terraform"));
    }

    #[test]
    fn test_join_pages_keeps_order_and_blank_pages() {
        let joined = join_pages(vec!["page one".into(), String::new(), "page three".into()]);
        assert_eq!(joined, "page one\n\npage three");
    }

    #[test]
    fn test_join_pages_zero_pages() {
        assert_eq!(join_pages(Vec::new()), "");
    }

    #[tokio::test]
    async fn test_extract_blocking_matches_sync() {
        let text = extract_blocking(text_doc(b"Senior backend engineer")).await.unwrap();
        assert_eq!(text, "Senior backend engineer");
    }
}
