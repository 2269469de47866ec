//! Device capture capabilities used as clock-in/out proof.
//!
//! Each capture is a single best-effort call: no retry, no watch, no
//! fallback path. Failures come back as a [`CaptureError`] with a message
//! suitable for the user.

pub mod camera;
pub mod location;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("{0} permission was denied")]
    PermissionDenied(&'static str),

    #[error("{0} is not available on this device")]
    Unavailable(&'static str),

    #[error("Timed out while waiting for {0}")]
    Timeout(&'static str),

    #[error("{0}")]
    Invalid(String),
}

pub use camera::{CameraCapture, CapturedPhoto, FilePhotoCapture};
pub use location::{FixedLocationProvider, LocationProvider, locate_with_timeout};
