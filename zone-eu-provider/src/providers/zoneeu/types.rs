//! zone.eu API 类型定义

use serde::{Deserialize, Serialize};

/// TXT 记录列表响应
#[derive(Debug, Default, Deserialize)]
pub struct TxtRecordListResponse {
    #[serde(rename = "data", default)]
    pub records: Vec<TxtRecord>,
    #[serde(default)]
    pub message: String,
}

/// zone.eu TXT 记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TxtRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub resource_url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub destination: String,
}

/// 创建 TXT 记录的请求体
#[derive(Debug, Serialize)]
pub struct CreateTxtRecordRequest<'a> {
    pub destination: &'a str,
    pub name: &'a str,
}
