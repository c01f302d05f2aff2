use super::*;

#[test]
fn classify_matches_device_error_names() {
    assert_eq!(
        CameraError::classify("NotAllowedError"),
        CameraError::PermissionDenied
    );
    assert_eq!(
        CameraError::classify("PermissionDeniedError"),
        CameraError::PermissionDenied
    );
    assert_eq!(CameraError::classify("NotFoundError"), CameraError::NoDevice);
    assert_eq!(
        CameraError::classify("DevicesNotFoundError"),
        CameraError::NoDevice
    );
    assert_eq!(
        CameraError::classify("NotReadableError"),
        CameraError::Other("NotReadableError".to_owned())
    );
}

#[test]
fn permission_transitions_follow_failure_kind() {
    let cur = PermissionState::Prompt;
    assert_eq!(
        CameraError::PermissionDenied.permission_after(cur),
        PermissionState::Denied
    );
    assert_eq!(
        CameraError::NoDevice.permission_after(cur),
        PermissionState::Denied
    );
    assert_eq!(
        CameraError::Unsupported.permission_after(cur),
        PermissionState::Unsupported
    );
    assert_eq!(
        CameraError::Other("busy".into()).permission_after(cur),
        PermissionState::Prompt
    );
}

#[test]
fn other_message_carries_reason() {
    let msg = CameraError::Other("TrackStartError".into()).user_message();
    assert!(msg.ends_with("TrackStartError"));
}
