use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::capture::CaptureError;
use crate::model::geo::GeoPoint;

const SOURCE: &str = "Location";

/// One-shot position lookup.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, CaptureError>;
}

/// Applies the geolocation timeout to a provider. A timeout is reported,
/// not retried; the user refreshes manually.
pub async fn locate_with_timeout(
    provider: &dyn LocationProvider,
    timeout: Duration,
) -> Result<GeoPoint, CaptureError> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(Ok(point)) if point.is_valid() => {
            debug!(%point, "Position captured");
            Ok(point)
        }
        Ok(Ok(point)) => Err(CaptureError::Invalid(format!(
            "Position {point} is outside the valid coordinate range"
        ))),
        Ok(Err(e)) => {
            warn!(error = %e, "Position capture failed");
            Err(e)
        }
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "Position capture timed out");
            Err(CaptureError::Timeout(SOURCE))
        }
    }
}

/// Coordinates typed in by the user (CLI `--lat/--lon`).
#[derive(Debug, Clone, Default)]
pub struct FixedLocationProvider {
    point: Option<GeoPoint>,
}

impl FixedLocationProvider {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            point: Some(GeoPoint::new(latitude, longitude)),
        }
    }

    /// Provider for a device without location support.
    pub fn none() -> Self {
        Self { point: None }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_position(&self) -> Result<GeoPoint, CaptureError> {
        self.point.ok_or(CaptureError::Unavailable(SOURCE))
    }
}
