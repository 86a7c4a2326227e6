use crate::config::DeviceConfig;
use thiserror::Error;

/// Why a device fix could not be obtained. The resolver logs the two cases
/// distinctly so operators can tell "no permission" from "no fix".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceLocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location service unavailable")]
    Unavailable,
}

/// Seam for the device location service, the resolver's last source before
/// giving up. No reverse geocoding happens behind this boundary; a fix is
/// raw coordinates only.
#[allow(async_fn_in_trait)]
pub trait DeviceLocator {
    async fn locate(&self) -> std::result::Result<(f64, f64), DeviceLocationError>;
}

/// Production locator backed by optional operator-configured coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredDeviceLocation {
    coords: Option<DeviceConfig>,
}

impl ConfiguredDeviceLocation {
    pub fn new(coords: Option<DeviceConfig>) -> Self {
        Self { coords }
    }
}

impl DeviceLocator for ConfiguredDeviceLocation {
    async fn locate(&self) -> std::result::Result<(f64, f64), DeviceLocationError> {
        match self.coords {
            Some(device) => Ok((device.latitude, device.longitude)),
            None => Err(DeviceLocationError::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_coords_produce_a_fix() {
        let locator = ConfiguredDeviceLocation::new(Some(DeviceConfig {
            latitude: 48.85,
            longitude: 2.35,
        }));
        let (lat, lon) = locator.locate().await.unwrap();
        assert!((lat - 48.85).abs() < f64::EPSILON);
        assert!((lon - 2.35).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn missing_coords_are_unavailable() {
        let locator = ConfiguredDeviceLocation::default();
        assert_eq!(
            locator.locate().await.unwrap_err(),
            DeviceLocationError::Unavailable
        );
    }
}
