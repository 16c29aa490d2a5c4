use axum::extract::Multipart;
use uuid::Uuid;

/// Parsed form fields from the multipart upload.
pub struct UploadForm {
    pub filename: String,
    pub data: Vec<u8>,
    pub session_id: Option<Uuid>,
}

/// Parse a multipart form upload into structured form fields.
///
/// Expects a `pdf` file field and an optional `session_id` text field.
/// Only PDFs are accepted: the filename extension (when present) must be
/// `.pdf` and the data must start with the `%PDF-` magic.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadForm, String> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut session_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "pdf" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();
                validate_pdf(&filename, &data)?;
                file = Some((filename, data));
            }
            "session_id" => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| format!("Failed to read session_id: {}", e))?;
                if !val.is_empty() {
                    session_id =
                        Some(Uuid::parse_str(&val).map_err(|_| "Invalid session id".to_string())?);
                }
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    let (filename, data) = file.ok_or("No file uploaded")?;

    Ok(UploadForm {
        filename,
        data,
        session_id,
    })
}

/// Reject non-PDF uploads by extension and magic bytes.
fn validate_pdf(filename: &str, data: &[u8]) -> Result<(), String> {
    let lower = filename.to_lowercase();
    if lower.contains('.') && !lower.ends_with(".pdf") {
        return Err("Only PDF uploads are supported".to_string());
    }
    if !data.starts_with(b"%PDF-") {
        return Err("File doesn't appear to be a valid PDF".to_string());
    }
    Ok(())
}
