//! ChallengeReview 处理
//!
//! cert-manager 通过 `POST /apis/{group}/v1alpha1/{solver}` 提交 `ChallengeReview`，
//! 根据 `request.action` 调用 solver 的 present / clean_up。

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use zone_eu_provider::{ChallengeAction, ChallengeRequest};

use crate::error::ApiError;
use crate::state::AppState;

pub const CHALLENGE_API_VERSION: &str = "acme.cert-manager.io/v1alpha1";
pub const CHALLENGE_KIND: &str = "ChallengeReview";

fn default_api_version() -> String {
    CHALLENGE_API_VERSION.to_string()
}

fn default_kind() -> String {
    CHALLENGE_KIND.to_string()
}

/// `ChallengeReview` 对象
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeReview {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ChallengeRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ChallengeResponse>,
}

/// Challenge 处理结果
#[derive(Debug, Deserialize, Serialize)]
pub struct ChallengeResponse {
    pub uid: String,
    pub success: bool,
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ChallengeStatus>,
}

/// 失败详情 (`metav1.Status` 子集)
#[derive(Debug, Deserialize, Serialize)]
pub struct ChallengeStatus {
    pub status: String,
    pub message: String,
    pub reason: String,
    pub code: u16,
}

impl ChallengeResponse {
    fn success(uid: String) -> Self {
        Self {
            uid,
            success: true,
            result: None,
        }
    }

    fn failure(uid: String, reason: &str, message: String, code: u16) -> Self {
        Self {
            uid,
            success: false,
            result: Some(ChallengeStatus {
                status: "Failure".to_string(),
                message,
                reason: reason.to_string(),
                code,
            }),
        }
    }
}

/// 处理 ChallengeReview
pub async fn solve_challenge(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    review: web::Json<ChallengeReview>,
) -> Result<HttpResponse, ApiError> {
    let (group, solver) = path.into_inner();
    state.ensure_solver(&group, &solver)?;

    let review = review.into_inner();
    let request = review
        .request
        .ok_or_else(|| ApiError::BadRequest("ChallengeReview 缺少 request".to_string()))?;

    tracing::debug!(
        "收到 Challenge 请求: uid={} action={:?} fqdn={}",
        request.uid,
        request.action,
        request.resolved_fqdn
    );

    let result = match request.action {
        ChallengeAction::Present => Some(state.solver.present(&request).await),
        ChallengeAction::CleanUp => Some(state.solver.clean_up(&request).await),
        ChallengeAction::Unknown => None,
    };

    let uid = request.uid.clone();
    let response = match result {
        Some(Ok(())) => ChallengeResponse::success(uid),
        Some(Err(e)) => {
            tracing::error!("Challenge {} ({:?}) 处理失败: {}", request.uid, request.action, e);
            ChallengeResponse::failure(uid, e.reason(), e.to_string(), 500)
        }
        None => ChallengeResponse::failure(
            uid,
            "BadRequest",
            "unsupported challenge action".to_string(),
            400,
        ),
    };

    Ok(HttpResponse::Ok().json(ChallengeReview {
        api_version: review.api_version,
        kind: review.kind,
        request: Some(request),
        response: Some(response),
    }))
}
