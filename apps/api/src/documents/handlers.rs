//! Axum route handler for document parsing, plus the multipart reader shared
//! with the onboarding upload.

use axum::{extract::Multipart, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::documents::{extract_text, DocumentKind};
use crate::errors::AppError;

/// A file part pulled out of a multipart body.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub kind: DocumentKind,
    pub data: Bytes,
}

#[derive(Debug, Serialize)]
pub struct ParsedDocumentResponse {
    pub content: String,
    pub filename: String,
}

/// Reads the `file` part. A missing part or an unsupported type is a 400.
pub async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("document").to_string();
        let kind = match field.content_type() {
            Some(mime) => DocumentKind::from_mime(mime),
            None => DocumentKind::from_filename(&filename),
        }
        .ok_or_else(|| AppError::Validation("Please upload a DOCX or PDF file".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        return Ok(UploadedFile {
            filename,
            kind,
            data,
        });
    }

    Err(AppError::Validation("No file provided".to_string()))
}

/// POST /api/parse-document (multipart, field `file`)
pub async fn handle_parse_document(
    mut multipart: Multipart,
) -> Result<Json<ParsedDocumentResponse>, AppError> {
    let upload = read_file_field(&mut multipart).await?;
    info!(
        "Parsing {:?} upload '{}' ({} bytes)",
        upload.kind,
        upload.filename,
        upload.data.len()
    );

    let content = extract_text(upload.kind, upload.data).await?;
    Ok(Json(ParsedDocumentResponse {
        content,
        filename: upload.filename,
    }))
}
