//! zone.eu HTTP 请求方法

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;

use super::{ZONE_EU_API_COMPATIBILITY, ZONE_EU_PROVIDER_NAME, ZoneEuProvider};

impl ZoneEuProvider {
    /// 执行 zone.eu API 请求
    ///
    /// 每次请求都带 JSON headers、`X-Api-Compatibility` 和 Basic 认证，只发送一次。
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header("X-Api-Compatibility", ZONE_EU_API_COMPATIBILITY)
            .basic_auth(
                &self.credentials.api_username,
                Some(&self.credentials.api_key),
            );

        if let Some(body) = body {
            builder = builder.body(body);
        }

        HttpUtils::execute_request(builder, ZONE_EU_PROVIDER_NAME, method.as_str(), url).await
    }

    /// 序列化请求体后执行请求
    pub(crate) async fn request_json<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<Vec<u8>> {
        let payload = serde_json::to_vec(body).map_err(|e| ProviderError::SerializationError {
            provider: ZONE_EU_PROVIDER_NAME.to_string(),
            detail: e.to_string(),
        })?;

        log::debug!("Request Body: {}", String::from_utf8_lossy(&payload));

        self.request(method, url, Some(payload)).await
    }
}
