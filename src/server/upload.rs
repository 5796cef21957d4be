use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::steganalysis::{BatchScanner, ScanConfig, write_text_report};

/// Multipart field carrying the uploaded files; may repeat.
pub const UPLOAD_FIELD: &str = "folder";

/// Name of the report written into each scratch directory.
pub const REPORT_FILE_NAME: &str = "analysis_report.txt";

const SCRATCH_PREFIX: &str = "stego-upload-";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No folder uploaded")]
    NoFolder,

    #[error("No files selected")]
    NoFiles,

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error("Failed to stage upload: {0}")]
    Staging(String),

    #[error("Scan failed: {0}")]
    Scan(String),
}

impl UploadError {
    fn status(&self) -> StatusCode {
        match self {
            UploadError::NoFolder | UploadError::NoFiles | UploadError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            UploadError::Staging(_) | UploadError::Scan(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub report: String,
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Shared state for the upload handlers.
pub struct AppState {
    pub scan: ScanConfig,
    pub scratch_parent: Option<PathBuf>,
}

fn sanitize_component(part: &str) -> String {
    part.chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect()
}

/// Reduces a client-supplied relative path to a single file name that is
/// safe to join onto the scratch directory. Directory separators become `_`
/// (`holiday/a/x.png` is `holiday_a_x.png`), `.` and `..` components are
/// dropped and only ASCII letters, digits, `.`, `-` and `_` survive. Returns
/// `None` when nothing usable remains.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let joined = raw
        .split(['/', '\\'])
        .filter(|part| !matches!(*part, "" | "." | ".."))
        .map(sanitize_component)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    let cleaned = joined.trim_start_matches(['.', '_']);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Returns `name`, or `name` with a numeric suffix before the extension when
/// it is already taken, and marks the result as taken.
pub(crate) fn claim_name(name: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.clone()) {
        return name;
    }

    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
        _ => (name.as_str(), None),
    };

    let mut suffix = 1u32;
    loop {
        let candidate = match extension {
            Some(extension) => format!("{stem}_{suffix}.{extension}"),
            None => format!("{stem}_{suffix}"),
        };
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}

fn create_scratch_dir(parent: Option<&Path>) -> Result<TempDir, UploadError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(SCRATCH_PREFIX);
    let scratch = match parent {
        Some(parent) => builder.tempdir_in(parent),
        None => builder.tempdir(),
    };
    scratch.map_err(|e| UploadError::Staging(e.to_string()))
}

/// Writes every file of the `folder` field into `scratch` under a distinct
/// name, returning how many were saved.
async fn stage_files(multipart: &mut Multipart, scratch: &Path) -> Result<usize, UploadError> {
    let mut saw_field = false;
    let mut saved = 0usize;
    let mut taken = HashSet::from([REPORT_FILE_NAME.to_string()]);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        saw_field = true;

        let Some(name) = field.file_name().and_then(sanitize_file_name) else {
            continue;
        };
        let name = claim_name(name, &mut taken);

        let data = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.body_text()))?;

        debug!("Staging {} ({} bytes)", name, data.len());
        tokio::fs::write(scratch.join(&name), &data)
            .await
            .map_err(|e| UploadError::Staging(format!("{name}: {e}")))?;
        saved += 1;
    }

    if !saw_field {
        return Err(UploadError::NoFolder);
    }
    if saved == 0 {
        return Err(UploadError::NoFiles);
    }
    Ok(saved)
}

/// Scans the staged files and returns the text report as written to disk.
/// Takes ownership of the scratch directory, which is removed when this
/// returns, whether or not the scan succeeded.
fn scan_scratch(scratch: TempDir, config: ScanConfig) -> Result<String, UploadError> {
    let root = scratch.path();
    let report = BatchScanner::new(config).scan(root);

    let report_path = root.join(REPORT_FILE_NAME);
    write_text_report(&report, &report_path).map_err(|e| UploadError::Scan(e.to_string()))?;

    std::fs::read_to_string(&report_path).map_err(|e| UploadError::Scan(e.to_string()))
}

async fn handle_upload(state: &AppState, mut multipart: Multipart) -> Result<String, UploadError> {
    let scratch = create_scratch_dir(state.scratch_parent.as_deref())?;
    let saved = stage_files(&mut multipart, scratch.path()).await?;
    info!(files = saved, dir = %scratch.path().display(), "Upload staged");

    let config = state.scan.clone();
    tokio::task::spawn_blocking(move || scan_scratch(scratch, config))
        .await
        .map_err(|e| UploadError::Scan(e.to_string()))?
}

#[instrument(skip_all)]
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    match handle_upload(&state, multipart).await {
        Ok(report) => Json(UploadResponse {
            success: true,
            report,
        })
        .into_response(),
        Err(e) => {
            warn!("Upload rejected: {}", e);
            e.into_response()
        }
    }
}
