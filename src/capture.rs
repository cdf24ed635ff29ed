//! Capture & persistence: composite the annotated map and file it with a project.
//!
//! DESIGN
//! ======
//! A save is a single transaction over an owned [`SaveSnapshot`], so the
//! live session stays editable while the save is pending:
//!
//! 1. composite base imagery + overlay into PNG bytes ([`Compositor`])
//! 2. request an upload slot and PUT the bytes ([`UploadService`])
//! 3. register the uploaded file with its measurement metadata ([`FileRegistry`])
//! 4. optionally persist the raw measurements (best effort)
//!
//! Any failure in steps 1-3 aborts the save with one [`SaveError`]. The
//! collaborators are implemented by the host and report failures as plain
//! messages; this module tags them with the step that failed.

#[cfg(test)]
#[path = "capture_test.rs"]
mod capture_test;

use std::cell::Cell;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::compass::CompassOverlay;
use crate::config::EngineConfig;
use crate::doc::Measurement;
use crate::geometry::Point;
use crate::input::{InputState, UiState};
use crate::render::Scene;

pub const PNG_MIME: &str = "image/png";
pub const FILE_TYPE: &str = "azimuth_map";
pub const FILE_LABEL: &str = "Azimuth Measurement Map";
pub const UNKNOWN_ADDRESS: &str = "Unknown location";

static IDLE: InputState = InputState::Idle;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("no measurements to save")]
    NothingToSave,
    #[error("a save is already in progress")]
    InProgress,
    #[error("project context required to save")]
    MissingProject,
    #[error("failed to composite map image: {0}")]
    Composite(String),
    #[error("failed to upload map image: {0}")]
    Upload(String),
    #[error("failed to register map file: {0}")]
    Register(String),
    #[error("failed to format capture time: {0}")]
    Timestamp(#[from] time::error::Format),
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Everything a save needs, copied out of the live session.
#[derive(Debug, Clone)]
pub struct SaveSnapshot {
    pub measurements: Vec<Measurement>,
    pub compass: CompassOverlay,
    pub ui: UiState,
    pub config: EngineConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    /// Street address of the imagery, if the host knows it.
    pub address: Option<String>,
    pub captured_at: OffsetDateTime,
}

impl SaveSnapshot {
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Render view of the snapshot. No gesture is ever in progress.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            measurements: &self.measurements,
            compass: &self.compass,
            ui: &self.ui,
            input: &IDLE,
            config: &self.config,
            viewport_w: self.viewport_width,
            viewport_h: self.viewport_height,
            dpr: self.dpr,
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Presigned upload slot handed out by the upload service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub upload_url: String,
    /// Storage key the file will live under once uploaded.
    pub file_key: String,
}

/// File record registered with the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRegistration {
    pub file_name: String,
    pub file_type: String,
    /// The storage key returned by [`UploadService::request_upload`].
    pub file_url: String,
    pub file_size_bytes: u64,
    pub mime_type: String,
    pub label: String,
    pub metadata: AzimuthMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzimuthMetadata {
    pub measurements: Vec<MeasurementRecord>,
    pub address: String,
    /// RFC 3339 capture time.
    pub captured_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub plane: u8,
    pub azimuth: u16,
    pub start: Point,
    pub end: Point,
}

impl From<&Measurement> for MeasurementRecord {
    fn from(m: &Measurement) -> Self {
        Self { plane: m.plane, azimuth: m.azimuth, start: m.start, end: m.end }
    }
}

impl FileRegistration {
    /// Build the registration for an uploaded PNG.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Timestamp`] if the capture time cannot be formatted.
    pub fn for_upload(
        file_name: &str,
        file_key: &str,
        file_size_bytes: u64,
        snapshot: &SaveSnapshot,
    ) -> Result<Self, SaveError> {
        let address = snapshot
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(UNKNOWN_ADDRESS);
        Ok(Self {
            file_name: file_name.to_owned(),
            file_type: FILE_TYPE.to_owned(),
            file_url: file_key.to_owned(),
            file_size_bytes,
            mime_type: PNG_MIME.to_owned(),
            label: FILE_LABEL.to_owned(),
            metadata: AzimuthMetadata {
                measurements: snapshot.measurements.iter().map(MeasurementRecord::from).collect(),
                address: address.to_owned(),
                captured_at: snapshot.captured_at.format(&Rfc3339)?,
            },
        })
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub file_name: String,
    pub file_key: String,
    pub file_size_bytes: u64,
    pub measurement_count: usize,
    /// Whether the optional raw-measurement persistence step succeeded.
    pub measurements_saved: bool,
}

/// `azimuth-map-YYYY-MM-DDTHH-MM-SS.png` for the given capture time (UTC).
///
/// # Errors
///
/// Returns [`SaveError::Timestamp`] if formatting fails.
pub fn file_name_for(captured_at: OffsetDateTime) -> Result<String, SaveError> {
    let stamp = captured_at
        .to_offset(time::UtcOffset::UTC)
        .format(format_description!("[year]-[month]-[day]T[hour]-[minute]-[second]"))?;
    Ok(format!("azimuth-map-{stamp}.png"))
}

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Produces the final raster: base imagery with the overlay drawn on top.
#[async_trait::async_trait(?Send)]
pub trait Compositor {
    /// Encode the composited map as PNG bytes.
    async fn composite(&self, snapshot: &SaveSnapshot) -> Result<Vec<u8>, String>;
}

/// Presigned-URL file upload.
#[async_trait::async_trait(?Send)]
pub trait UploadService {
    async fn request_upload(&self, project_id: &str, file_name: &str) -> Result<UploadTarget, String>;

    async fn upload(&self, target: &UploadTarget, bytes: Vec<u8>, mime_type: &str) -> Result<(), String>;
}

/// Project file records.
#[async_trait::async_trait(?Send)]
pub trait FileRegistry {
    async fn register_file(&self, project_id: &str, registration: &FileRegistration) -> Result<(), String>;

    /// Persist the raw measurements alongside the file. Returns `Ok(false)`
    /// when the backend has no such endpoint.
    async fn save_measurements(&self, _project_id: &str, _measurements: &[Measurement]) -> Result<bool, String> {
        Ok(false)
    }
}

// =============================================================================
// ADAPTER
// =============================================================================

/// Runs save transactions against the host's upload and registry services.
///
/// At most one save runs at a time per adapter.
pub struct CaptureAdapter<U, R> {
    uploads: U,
    registry: R,
    in_flight: Cell<bool>,
}

impl<U: UploadService, R: FileRegistry> CaptureAdapter<U, R> {
    #[must_use]
    pub fn new(uploads: U, registry: R) -> Self {
        Self { uploads, registry, in_flight: Cell::new(false) }
    }

    /// Whether a save is currently pending.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.in_flight.get()
    }

    #[must_use]
    pub fn uploads(&self) -> &U {
        &self.uploads
    }

    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Composite, upload, and register the annotated map.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] naming the first step that failed. Precondition
    /// failures (`MissingProject`, `NothingToSave`, `InProgress`) are raised
    /// before any collaborator is called.
    pub async fn save<C>(&self, project_id: &str, snapshot: SaveSnapshot, compositor: &C) -> Result<SaveReceipt, SaveError>
    where
        C: Compositor + ?Sized,
    {
        if project_id.trim().is_empty() {
            return Err(SaveError::MissingProject);
        }
        if snapshot.measurements.is_empty() {
            return Err(SaveError::NothingToSave);
        }
        let Some(mut guard) = InFlight::acquire(&self.in_flight) else {
            log::warn!("save rejected: another save is in progress");
            return Err(SaveError::InProgress);
        };

        let result = self.run(project_id, &snapshot, compositor, &mut guard).await;
        match &result {
            Ok(receipt) => log::info!(
                "saved {} ({} bytes, {} measurements) to project {project_id}",
                receipt.file_name,
                receipt.file_size_bytes,
                receipt.measurement_count
            ),
            Err(e) => log::error!("save to project {project_id} failed: {e}"),
        }
        result
    }

    async fn run<C>(
        &self,
        project_id: &str,
        snapshot: &SaveSnapshot,
        compositor: &C,
        guard: &mut InFlight<'_>,
    ) -> Result<SaveReceipt, SaveError>
    where
        C: Compositor + ?Sized,
    {
        let bytes = compositor.composite(snapshot).await.map_err(SaveError::Composite)?;
        let file_name = file_name_for(snapshot.captured_at)?;
        let file_size_bytes = bytes.len() as u64;

        let target = self
            .uploads
            .request_upload(project_id, &file_name)
            .await
            .map_err(SaveError::Upload)?;
        self.uploads.upload(&target, bytes, PNG_MIME).await.map_err(SaveError::Upload)?;
        guard.uploaded = Some(target.file_key.clone());

        let registration = FileRegistration::for_upload(&file_name, &target.file_key, file_size_bytes, snapshot)?;
        let registered = self.registry.register_file(project_id, &registration).await;
        guard.uploaded = None;
        if let Err(e) = registered {
            log::error!("uploaded {} but registration failed; file is orphaned", target.file_key);
            return Err(SaveError::Register(e));
        }

        let measurements_saved = match self.registry.save_measurements(project_id, &snapshot.measurements).await {
            Ok(saved) => saved,
            Err(e) => {
                log::warn!("measurement data not saved for project {project_id}: {e}");
                false
            }
        };

        Ok(SaveReceipt {
            file_name,
            file_key: target.file_key,
            file_size_bytes,
            measurement_count: snapshot.measurements.len(),
            measurements_saved,
        })
    }
}

/// Marks a save as pending; cleared on drop, including when the save future
/// is dropped mid-flight.
struct InFlight<'a> {
    flag: &'a Cell<bool>,
    /// Key of a file that is uploaded but not yet registered.
    uploaded: Option<String>,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self { flag, uploaded: None })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(key) = self.uploaded.take() {
            log::error!("save cancelled after upload; {key} is orphaned");
        }
        self.flag.set(false);
    }
}
