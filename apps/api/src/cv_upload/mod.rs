//! CV upload: stores candidate CVs (CSV or DOCX) in the object store.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

pub mod handlers;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvFormat {
    Csv,
    Docx,
}

impl CvFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, AppError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(CvFormat::Csv),
            Some("docx") => Ok(CvFormat::Docx),
            _ => Err(AppError::Validation(
                "Only CSV or DOCX files allowed".to_string(),
            )),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            CvFormat::Csv => "text/csv",
            CvFormat::Docx => DOCX_MIME,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CvUploadResponse {
    pub success: bool,
    pub file_id: String,
    pub file_name: String,
}

/// Object key for an uploaded CV. The uuid prefix keeps same-named files apart.
pub fn object_key(upload_id: Uuid, file_name: &str) -> String {
    let safe_name: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("cvs/{upload_id}/{safe_name}")
}

pub async fn store_cv(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    file_name: &str,
    data: Bytes,
) -> Result<CvUploadResponse, AppError> {
    let format = CvFormat::from_file_name(file_name)?;
    let key = object_key(Uuid::new_v4(), file_name);

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(data))
        .content_type(format.mime_type())
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    info!("Uploaded CV to s3://{}/{}", bucket, key);

    Ok(CvUploadResponse {
        success: true,
        file_id: key,
        file_name: file_name.to_string(),
    })
}
