//! 通用 HTTP 客户端工具
//!
//! 统一处理发送请求、日志记录、状态码判定和响应读取。
//! 调用方自己构造 `RequestBuilder`（URL、headers、认证、body）。

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

/// 视为成功的 HTTP 状态码
const SUCCESS_CODES: [StatusCode; 3] =
    [StatusCode::OK, StatusCode::CREATED, StatusCode::NO_CONTENT];

/// HTTP 工具函数集
pub struct HttpUtils;

impl HttpUtils {
    /// 状态码是否视为成功（仅 200 / 201 / 204）
    pub fn is_success(status: StatusCode) -> bool {
        SUCCESS_CODES.contains(&status)
    }

    /// 执行 HTTP 请求并返回原始响应体
    ///
    /// # Arguments
    /// * `request_builder` - 已配置好的请求构造器
    /// * `provider_name` - Provider 名称（用于日志）
    /// * `method_name` - 请求方法名（用于日志和错误信息）
    /// * `url` - 请求 URL（用于日志和错误信息）
    ///
    /// # Returns
    /// * `Ok(body)` - 状态码为 200/201/204 时返回响应体（204 时可能为空）
    /// * `Err(ProviderError::ApiStatus)` - 其他状态码，错误中不包含响应体
    /// * `Err(ProviderError::NetworkError)` - 网络错误
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        log::debug!("[{provider_name}] Response Status: {status}");

        if !Self::is_success(status) {
            // response 在此处 drop，连接随之释放
            let error = ProviderError::ApiStatus {
                provider: provider_name.to_string(),
                status: status.to_string(),
                url: url.to_string(),
                method: method_name.to_string(),
            };
            log::error!("[{provider_name}] {error}");
            return Err(error);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("读取响应失败: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            String::from_utf8_lossy(&body)
        );

        Ok(body.to_vec())
    }

    /// 解析 JSON 响应
    ///
    /// # Returns
    /// * `Ok(T)` - 成功解析
    /// * `Err(ProviderError::ParseError)` - 解析失败
    pub fn parse_json<T>(body: &[u8], provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(body).map_err(|e| {
            log::error!("[{provider_name}] JSON 解析失败: {e}");
            log::error!("[{provider_name}] 原始响应: {}", String::from_utf8_lossy(body));
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
