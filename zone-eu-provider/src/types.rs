//! 公共类型定义

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Challenge 动作
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeAction {
    #[default]
    Present,
    CleanUp,
    /// 无法识别的动作
    #[serde(other)]
    Unknown,
}

/// cert-manager 下发的 Challenge 请求 (`acme.cert-manager.io/v1alpha1`)
///
/// 对本系统只读。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChallengeRequest {
    pub uid: String,
    pub action: ChallengeAction,
    #[serde(rename = "type")]
    pub challenge_type: String,
    pub dns_name: String,
    /// 需要发布到 TXT 记录中的 proof token
    pub key: String,
    pub resource_namespace: String,
    #[serde(rename = "resolvedFQDN")]
    pub resolved_fqdn: String,
    pub resolved_zone: String,
    pub allow_ambient_credentials: bool,
    /// Issuer 中 webhook 段落的原始 solver 配置
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

/// 去掉 FQDN 末尾的一个或多个 `.`
pub fn normalize_fqdn(fqdn: &str) -> &str {
    fqdn.trim_end_matches('.')
}
