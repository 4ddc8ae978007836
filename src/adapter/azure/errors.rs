//! Azure Error Classification
//!
//! Azure SDKのエラー分類
//!
//! 分類はHTTPステータスとエラーコードで行う。
//! メッセージ文字列にはレスポンスヘッダーも含まれるため判定には使わない

use azure_core::error::{Error, ErrorKind};
use azure_core::StatusCode;

/// Convert error chain to string including all causes
pub fn error_chain_to_string(e: &anyhow::Error) -> String {
    let mut messages = Vec::new();
    for cause in e.chain() {
        messages.push(cause.to_string());
    }
    messages.join(" | ")
}

/// HTTP status of a service response error
pub fn http_status(e: &Error) -> Option<StatusCode> {
    match e.kind() {
        ErrorKind::HttpResponse { status, .. } => Some(*status),
        _ => None,
    }
}

/// Check if container creation failed because the container is already there
///
/// Only `409 ContainerAlreadyExists`; other conflicts such as
/// `ContainerBeingDeleted` are real failures
pub fn is_container_already_exists(e: &Error) -> bool {
    match e.kind() {
        ErrorKind::HttpResponse {
            status: StatusCode::Conflict,
            error_code: Some(code),
        } => code == "ContainerAlreadyExists",
        _ => false,
    }
}

/// Check if the service answered 404
pub fn is_not_found(e: &Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::HttpResponse {
            status: StatusCode::NotFound,
            ..
        }
    )
}

/// Check if the service rejected the credentials (401/403)
pub fn is_auth_error(e: &Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::HttpResponse {
            status: StatusCode::Unauthorized | StatusCode::Forbidden,
            ..
        }
    )
}

/// Describe an Azure error for the task log
pub fn describe_error(e: Error) -> String {
    let auth = is_auth_error(&e);
    let error_msg = error_chain_to_string(&anyhow::Error::from(e));
    if auth {
        format!(
            "authentication failed (check StorageAccountName/StorageAccountKey): {}",
            error_msg
        )
    } else {
        error_msg
    }
}
