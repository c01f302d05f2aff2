use crate::camera::error::CameraError;

/// Live camera permission status as last reported by the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
    Prompt,
    Unsupported,
}

impl PermissionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Prompt => "prompt",
            Self::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of the initial permission status.
pub trait PermissionProbe {
    fn query(&self) -> Result<PermissionState, CameraError>;
}

/// Probe that always reports the same state.
#[derive(Clone, Copy, Debug)]
pub struct FixedPermission(pub PermissionState);

impl PermissionProbe for FixedPermission {
    fn query(&self) -> Result<PermissionState, CameraError> {
        Ok(self.0)
    }
}

/// Query a probe, mapping any failure to `Unsupported`.
pub fn initial_permission(probe: &dyn PermissionProbe) -> PermissionState {
    match probe.query() {
        Ok(state) => state,
        Err(err) => {
            tracing::debug!(%err, "permission query failed");
            PermissionState::Unsupported
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/permission.rs"]
mod tests;
