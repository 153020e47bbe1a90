//! API 发现与健康检查

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

use super::challenge::CHALLENGE_KIND;

pub const API_VERSION: &str = "v1alpha1";

/// `APIResourceList`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceList {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub group_version: String,
    pub resources: Vec<ApiResource>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    pub name: String,
    pub singular_name: String,
    pub namespaced: bool,
    pub kind: &'static str,
    pub verbs: Vec<&'static str>,
}

/// 列出 group 下的 solver 资源
pub async fn api_resources(
    state: web::Data<AppState>,
    group: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let group = group.into_inner();
    state.ensure_group(&group)?;

    let name = state.solver.name().to_string();
    Ok(HttpResponse::Ok().json(ApiResourceList {
        kind: "APIResourceList",
        api_version: "v1",
        group_version: format!("{group}/{API_VERSION}"),
        resources: vec![ApiResource {
            singular_name: name.clone(),
            name,
            namespaced: false,
            kind: CHALLENGE_KIND,
            verbs: vec!["create"],
        }],
    }))
}

pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}
