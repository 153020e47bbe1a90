//! Solver 配置加载

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProviderError, Result};

/// Issuer 中为 zone.eu solver 配置的参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// 存放 API 凭证的 Secret 名称
    #[serde(rename = "secretName")]
    pub secret_ref: String,
    #[serde(rename = "zoneName")]
    pub zone_name: String,
    #[serde(rename = "apiUrl")]
    pub api_url: String,
}

/// 解析请求附带的 solver 配置
///
/// 未提供配置时返回全空字符串的默认配置，空值交由后续的认证失败暴露。
pub fn load_config(raw: Option<&Value>) -> Result<ProviderConfig> {
    let Some(raw) = raw else {
        return Ok(ProviderConfig::default());
    };

    ProviderConfig::deserialize(raw).map_err(|e| ProviderError::ConfigDecode {
        detail: e.to_string(),
    })
}
