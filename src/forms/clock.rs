//! Clock-in/out form: both a location and a photo are mandatory proof.

use std::time::Duration;

use strum_macros::Display;
use uuid::Uuid;

use crate::capture::{CameraCapture, CapturedPhoto, LocationProvider, locate_with_timeout};
use crate::error::ValidationError;
use crate::forms::upload::PHOTO_POLICY;
use crate::http::MultipartForm;
use crate::model::geo::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClockKind {
    #[strum(serialize = "clock in")]
    In,
    #[strum(serialize = "clock out")]
    Out,
}

#[derive(Debug, Clone)]
pub struct ClockForm {
    pub kind: ClockKind,
    pub location: Option<GeoPoint>,
    pub photo: Option<CapturedPhoto>,
    pub notes: Option<String>,
    /// Schedule location the user says they are at, for WFO schedules.
    pub schedule_location_id: Option<Uuid>,
    pub location_error: Option<String>,
    pub photo_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClockSubmission {
    pub kind: ClockKind,
    pub location: GeoPoint,
    pub photo: CapturedPhoto,
    pub notes: Option<String>,
    pub schedule_location_id: Option<Uuid>,
}

impl ClockSubmission {
    pub fn to_multipart(&self) -> MultipartForm {
        MultipartForm::new()
            .text("latitude", self.location.latitude)
            .text("longitude", self.location.longitude)
            .text_opt("accuracy", self.location.accuracy_m)
            .text_opt("notes", self.notes.as_deref())
            .text_opt("schedule_location_id", self.schedule_location_id)
            .file(self.photo.clone().into_part("photo"))
    }
}

impl ClockForm {
    pub fn new(kind: ClockKind) -> Self {
        Self {
            kind,
            location: None,
            photo: None,
            notes: None,
            schedule_location_id: None,
            location_error: None,
            photo_error: None,
        }
    }

    /// One-shot location capture; calling it again is the manual refresh.
    pub async fn capture_location(&mut self, provider: &dyn LocationProvider, timeout: Duration) {
        match locate_with_timeout(provider, timeout).await {
            Ok(point) => {
                self.location = Some(point);
                self.location_error = None;
            }
            Err(e) => {
                self.location = None;
                self.location_error = Some(e.to_string());
            }
        }
    }

    pub async fn capture_photo(&mut self, camera: &dyn CameraCapture) {
        match camera.capture().await {
            Ok(photo) => self.set_photo(photo),
            Err(e) => {
                self.photo = None;
                self.photo_error = Some(e.to_string());
            }
        }
    }

    pub fn set_photo(&mut self, photo: CapturedPhoto) {
        match PHOTO_POLICY.check(&photo.mime, photo.size()) {
            Ok(()) => {
                self.photo = Some(photo);
                self.photo_error = None;
            }
            Err(e) => {
                self.photo = None;
                self.photo_error = Some(e.message);
            }
        }
    }

    /// Submit button state.
    pub fn can_submit(&self) -> bool {
        self.location.is_some() && self.photo.is_some()
    }

    pub fn validate(&self) -> Result<ClockSubmission, ValidationError> {
        let location = self.location.ok_or_else(|| {
            ValidationError::new(
                "location",
                self.location_error
                    .clone()
                    .unwrap_or_else(|| "Location is required".to_string()),
            )
        })?;
        let photo = self.photo.clone().ok_or_else(|| {
            ValidationError::new(
                "photo",
                self.photo_error
                    .clone()
                    .unwrap_or_else(|| "Photo is required".to_string()),
            )
        })?;

        Ok(ClockSubmission {
            kind: self.kind,
            location,
            photo,
            notes: self
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            schedule_location_id: self.schedule_location_id,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_photo() -> CapturedPhoto {
    CapturedPhoto {
        file_name: "selfie.jpg".into(),
        mime: "image/jpeg".into(),
        bytes: vec![0xFF, 0xD8, 0xFF],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::FixedLocationProvider;

    #[test]
    fn blocked_without_location_or_photo() {
        let mut form = ClockForm::new(ClockKind::In);
        form.notes = Some("On site".into());
        assert!(!form.can_submit());
        assert_eq!(form.validate().unwrap_err().field, "location");

        form.location = Some(GeoPoint::new(-6.2, 106.8));
        assert!(!form.can_submit());
        assert_eq!(form.validate().unwrap_err().field, "photo");

        form.location = None;
        form.set_photo(sample_photo());
        assert!(!form.can_submit());
        assert_eq!(form.validate().unwrap_err().field, "location");
    }

    #[test]
    fn complete_form_builds_multipart() {
        let mut form = ClockForm::new(ClockKind::Out);
        form.location = Some(GeoPoint::new(-6.2, 106.8));
        form.set_photo(sample_photo());
        form.notes = Some("   ".into());

        let submission = form.validate().unwrap();
        assert_eq!(submission.notes, None);

        let body = submission.to_multipart();
        assert_eq!(body.field("latitude"), Some("-6.2"));
        assert_eq!(body.files.len(), 1);
        assert_eq!(body.files[0].field, "photo");
    }

    #[tokio::test]
    async fn capture_failure_is_kept_as_message() {
        let mut form = ClockForm::new(ClockKind::In);
        form.capture_location(&FixedLocationProvider::none(), Duration::from_secs(1))
            .await;
        assert_eq!(
            form.location_error.as_deref(),
            Some("Location is not available on this device")
        );
        let err = form.validate().unwrap_err();
        assert_eq!(err.message, "Location is not available on this device");

        form.capture_location(&FixedLocationProvider::new(-6.2, 106.8), Duration::from_secs(1))
            .await;
        assert!(form.location.is_some());
        assert!(form.location_error.is_none());
    }

    #[test]
    fn wrong_photo_type_is_not_kept() {
        let mut form = ClockForm::new(ClockKind::In);
        form.set_photo(CapturedPhoto {
            file_name: "x.gif".into(),
            mime: "image/gif".into(),
            bytes: vec![1],
        });
        assert!(form.photo.is_none());
        assert_eq!(form.photo_error.as_deref(), Some("File type image/gif is not allowed"));
    }
}
