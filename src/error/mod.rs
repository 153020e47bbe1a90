//! 错误处理模块

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("请求参数错误: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Kubernetes `metav1.Status` 中的 reason
    fn reason(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::BadRequest(_) => "BadRequest",
        }
    }
}

/// Kubernetes 风格的错误响应 (`metav1.Status`)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub status: &'static str,
    pub message: String,
    pub reason: String,
    pub code: u16,
}

impl StatusBody {
    pub fn failure(message: impl Into<String>, reason: impl Into<String>, code: u16) -> Self {
        Self {
            kind: "Status",
            api_version: "v1",
            status: "Failure",
            message: message.into(),
            reason: reason.into(),
            code,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(StatusBody::failure(
            self.to_string(),
            self.reason(),
            status.as_u16(),
        ))
    }
}

impl From<actix_web::error::JsonPayloadError> for ApiError {
    fn from(err: actix_web::error::JsonPayloadError) -> Self {
        Self::BadRequest(format!("JSON 解析错误: {err}"))
    }
}
