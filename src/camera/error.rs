use crate::camera::permission::PermissionState;

/// Coarse classification of camera acquisition failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The user or platform refused camera access.
    #[error("camera permission denied")]
    PermissionDenied,

    /// No capture device is present.
    #[error("no camera device found")]
    NoDevice,

    /// The platform offers no camera API at all.
    #[error("camera access is not supported")]
    Unsupported,

    /// Anything else, with the device-reported reason.
    #[error("camera error: {0}")]
    Other(String),
}

impl CameraError {
    /// Classify a device error name (for example `NotAllowedError` or `NotFoundError`).
    pub fn classify(name: &str) -> Self {
        if name.contains("NotAllowed") || name.contains("Permission") {
            Self::PermissionDenied
        } else if name.contains("NotFound") || name.contains("DevicesNotFound") {
            Self::NoDevice
        } else {
            Self::Other(name.to_owned())
        }
    }

    /// Text shown to the user in place of the live preview.
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied => {
                "Camera permission was denied or camera access is blocked.".to_owned()
            }
            Self::NoDevice => "No camera device was found.".to_owned(),
            Self::Unsupported => "This environment does not support camera access.".to_owned(),
            Self::Other(reason) => format!("Could not access the camera: {reason}"),
        }
    }

    /// Permission state after this failure; `Other` leaves it as it was.
    pub fn permission_after(&self, current: PermissionState) -> PermissionState {
        match self {
            Self::PermissionDenied | Self::NoDevice => PermissionState::Denied,
            Self::Unsupported => PermissionState::Unsupported,
            Self::Other(_) => current,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/error.rs"]
mod tests;
