//! Plain-text extraction from uploaded résumés (PDF and DOCX).

pub mod handlers;

use std::io::{Cursor, Read};

use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Upload cap for a single résumé file.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Failed to read DOCX as ZIP: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Invalid DOCX: missing word/document.xml")]
    MissingBody,

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Only the two supported MIME types map to a kind.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(PDF_MIME) {
            Some(DocumentKind::Pdf)
        } else if essence.eq_ignore_ascii_case(DOCX_MIME) {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }

    /// Fallback for clients that send no part content type.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }
}

/// Extracts text off the async runtime. A panicking PDF parser surfaces as
/// `DocumentError::Task` instead of taking the worker down.
pub async fn extract_text(kind: DocumentKind, data: Bytes) -> Result<String, DocumentError> {
    let text = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => extract_pdf(&data),
        DocumentKind::Docx => extract_docx(&data),
    })
    .await
    .map_err(|e| DocumentError::Task(e.to_string()))??;

    debug!("Extracted {} chars from {kind:?}", text.len());
    Ok(text)
}

fn extract_pdf(data: &[u8]) -> Result<String, DocumentError> {
    let text =
        pdf_extract::extract_text_from_mem(data).map_err(|e| DocumentError::Pdf(e.to_string()))?;
    Ok(text.trim().to_string())
}

/// Reads `word/document.xml` and joins the text runs of each non-empty
/// paragraph, one paragraph per line.
fn extract_docx(data: &[u8]) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    let mut doc_xml = String::new();
    {
        let mut entry = archive
            .by_name("word/document.xml")
            .map_err(|_| DocumentError::MissingBody)?;
        entry.read_to_string(&mut doc_xml)?;
    }

    let mut reader = Reader::from_str(&doc_xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"p" => paragraph.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"tab" => paragraph.push('\t'),
                b"br" => paragraph.push('\n'),
                _ => {}
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"p" => {
                    let text = paragraph.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                    paragraph.clear();
                }
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(ref e) if in_text => {
                if let Ok(text) = e.unescape() {
                    paragraph.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn docx_with_body(xml: &str) -> Bytes {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        Bytes::from(zip.finish().unwrap().into_inner())
    }

    #[test]
    fn test_mime_detection() {
        assert_eq!(DocumentKind::from_mime(PDF_MIME), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_mime(DOCX_MIME), Some(DocumentKind::Docx));
        assert_eq!(
            DocumentKind::from_mime("application/pdf; charset=binary"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::from_mime("text/plain"), None);
        assert_eq!(DocumentKind::from_mime("application/msword"), None);
    }

    #[test]
    fn test_filename_fallback() {
        assert_eq!(DocumentKind::from_filename("CV.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("cv.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("cv.doc"), None);
    }

    #[tokio::test]
    async fn test_docx_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Backend </w:t></w:r><w:r><w:t>Engineer &amp; SRE</w:t></w:r></w:p>
    <w:p></w:p>
    <w:p><w:r><w:t>Rust, Go, PostgreSQL</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let text = extract_text(DocumentKind::Docx, docx_with_body(xml))
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nBackend Engineer & SRE\nRust, Go, PostgreSQL");
    }

    #[tokio::test]
    async fn test_docx_without_body_is_rejected() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("readme.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"not a document").unwrap();
        let data = Bytes::from(zip.finish().unwrap().into_inner());

        let err = extract_text(DocumentKind::Docx, data).await.unwrap_err();
        assert!(matches!(err, DocumentError::MissingBody));
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_not_a_pdf() {
        let err = extract_text(DocumentKind::Pdf, Bytes::from_static(b"%PDF-1.4 truncated"))
            .await
            .unwrap_err();
        // A parser panic is caught by the blocking task and reported, not propagated.
        assert!(matches!(err, DocumentError::Pdf(_) | DocumentError::Task(_)));
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_not_a_docx() {
        let err = extract_text(DocumentKind::Docx, Bytes::from_static(b"plainly not a zip"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::Archive(_)));
    }
}
