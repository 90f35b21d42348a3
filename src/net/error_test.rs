use super::*;

#[test]
fn application_error_displays_message_verbatim() {
    assert_eq!(ApiError::Application("X".into()).to_string(), "X");
}

#[test]
fn http_error_message_includes_status() {
    let err = ApiError::Http { status: 500 };
    assert!(err.to_string().contains("500"));
    assert_eq!(err.status(), Some(500));
}

#[test]
fn transport_error_converts_to_api_error() {
    let err: ApiError = TransportError("connection refused".into()).into();
    assert_eq!(err, ApiError::Transport("connection refused".into()));
    assert_eq!(err.status(), None);
}

#[test]
fn kinds_are_stable_codes() {
    assert_eq!(ApiError::Transport(String::new()).kind(), "E_TRANSPORT");
    assert_eq!(ApiError::Http { status: 404 }.kind(), "E_HTTP");
    assert_eq!(ApiError::Application(String::new()).kind(), "E_APPLICATION");
    assert_eq!(ApiError::Decode(String::new()).kind(), "E_DECODE");
    assert_eq!(ApiError::Cancelled.kind(), "E_CANCELLED");
}
