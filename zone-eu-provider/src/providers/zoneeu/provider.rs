//! zone.eu TXT 记录操作

use reqwest::Method;

use crate::error::Result;
use crate::http_client::HttpUtils;

use super::{
    CreateTxtRecordRequest, TxtRecord, TxtRecordListResponse, ZONE_EU_PROVIDER_NAME,
    ZoneEuProvider,
};

impl ZoneEuProvider {
    /// 去掉末尾 `.` 的 zone 名称
    fn trimmed_zone(&self) -> &str {
        self.credentials.zone_name.trim_end_matches('.')
    }

    /// 列出 zone 下所有 TXT 记录，返回原始响应体
    ///
    /// 注意: 这里的 zone 名称不去掉末尾的 `.`。
    pub async fn list_txt_records(&self) -> Result<Vec<u8>> {
        let url = self.txt_collection_url(&self.credentials.zone_name);
        self.request(Method::GET, &url, None).await
    }

    /// 解析 TXT 记录列表
    pub fn decode_txt_records(body: &[u8]) -> Result<TxtRecordListResponse> {
        HttpUtils::parse_json(body, ZONE_EU_PROVIDER_NAME)
    }

    /// 创建 TXT 记录
    pub async fn create_txt_record(&self, name: &str, destination: &str) -> Result<Vec<u8>> {
        let url = self.txt_collection_url(self.trimmed_zone());
        let body = CreateTxtRecordRequest { destination, name };
        self.request_json(Method::POST, &url, &body).await
    }

    /// 按 ID 删除 TXT 记录
    ///
    /// `record_id` 为空时请求路径以 `txt/` 结尾，行为由 zone.eu 决定。
    pub async fn delete_txt_record(&self, record_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/{record_id}", self.txt_collection_url(self.trimmed_zone()));
        self.request(Method::DELETE, &url, None).await
    }
}

/// 按名称查找记录 ID
///
/// 从列表末尾向前扫描，重名时取原顺序中最后一条；找不到返回空字符串。
pub fn find_record_id<'a>(records: &'a [TxtRecord], name: &str) -> &'a str {
    records
        .iter()
        .rev()
        .find(|record| record.name == name)
        .map_or("", |record| record.id.as_str())
}
