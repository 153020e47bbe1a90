//! zone.eu DNS Provider

mod http;
mod provider;
mod types;

use reqwest::Client;

pub use provider::find_record_id;
pub use types::{CreateTxtRecordRequest, TxtRecord, TxtRecordListResponse};

use crate::credentials::ResolvedCredentials;

pub(crate) const ZONE_EU_PROVIDER_NAME: &str = "zone-eu";
pub(crate) const ZONE_EU_API_COMPATIBILITY: &str = "2.1";

/// zone.eu DNS Provider
///
/// 每个请求用最新解析出的凭证构造一次。
pub struct ZoneEuProvider {
    pub(crate) client: Client,
    pub(crate) credentials: ResolvedCredentials,
}

impl ZoneEuProvider {
    pub fn new(client: Client, credentials: ResolvedCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// `<apiUrl>/dns/<zone>/txt`
    pub(crate) fn txt_collection_url(&self, zone: &str) -> String {
        format!("{}/dns/{}/txt", self.credentials.api_url, zone)
    }
}
