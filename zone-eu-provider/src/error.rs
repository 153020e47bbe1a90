//! 错误类型定义

use thiserror::Error;

/// Provider 层统一错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 请求附带的 solver 配置 JSON 无法解析
    #[error("error decoding solver config: {detail}")]
    ConfigDecode { detail: String },

    /// Secret 不存在
    #[error("unable to get secret `{namespace}/{name}`: not found")]
    SecretNotFound { namespace: String, name: String },

    /// Secret 存在但缺少必需的键
    #[error("key {key:?} not found in secret `{namespace}/{name}`")]
    MissingSecretKey {
        namespace: String,
        name: String,
        key: String,
    },

    /// Secret 存储访问失败（API 错误、网络错误等）
    #[error("unable to get secret `{namespace}/{name}`: {detail}")]
    SecretStore {
        namespace: String,
        name: String,
        detail: String,
    },

    /// Secret 存储句柄尚未初始化
    #[error("secret store is not initialized")]
    NotInitialized,

    /// 网络层错误（连接失败、DNS 解析失败等），没有 HTTP 状态行
    #[error("[{provider}] network error: {detail}")]
    NetworkError { provider: String, detail: String },

    /// 非 200/201/204 的 HTTP 响应
    #[error("Error calling API status:{status} url: {url} method: {method}")]
    ApiStatus {
        provider: String,
        status: String,
        url: String,
        method: String,
    },

    /// 响应 JSON 解析失败
    #[error("[{provider}] unable to unmarshal response: {detail}")]
    ParseError { provider: String, detail: String },

    /// 请求体序列化失败
    #[error("[{provider}] serialization error: {detail}")]
    SerializationError { provider: String, detail: String },
}

impl ProviderError {
    /// 是否为 secret 查找类错误（不存在 / 缺键 / 存储不可用 / 未初始化）
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            Self::SecretNotFound { .. }
                | Self::MissingSecretKey { .. }
                | Self::SecretStore { .. }
                | Self::NotInitialized
        )
    }
}

/// Provider 层 Result 别名
pub type Result<T> = std::result::Result<T, ProviderError>;
