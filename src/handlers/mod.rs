//! HTTP 处理器

pub mod challenge;
pub mod discovery;

use actix_web::web;

use crate::error::ApiError;

/// 配置路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| ApiError::from(err).into()),
    )
    .route("/healthz", web::get().to(discovery::healthz))
    .route("/readyz", web::get().to(discovery::healthz))
    .service(
        web::scope("/apis/{group}/v1alpha1")
            .route("", web::get().to(discovery::api_resources))
            .route("/{solver}", web::post().to(challenge::solve_challenge)),
    );
}
