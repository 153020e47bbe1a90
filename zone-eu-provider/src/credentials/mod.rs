//! 凭证解析
//!
//! 每次操作都从 Secret 存储重新读取，不做缓存。

mod kubernetes;
mod memory;

use std::fmt;

pub use kubernetes::KubeSecretStore;
pub use memory::MemorySecretStore;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::traits::{SecretData, SecretStore};

/// Secret 中 API key 的键名
pub const API_KEY_FIELD: &str = "api-key";
/// Secret 中 API 用户名的键名
pub const API_USERNAME_FIELD: &str = "api-username";

/// Secret 中读取到的 API 凭证
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub api_username: String,
    pub api_key: String,
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_username", &self.api_username)
            .field("api_key", &"***")
            .finish()
    }
}

/// 单次请求使用的完整凭证 (配置 + Secret)
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub api_username: String,
    pub api_key: String,
    pub zone_name: String,
    pub api_url: String,
}

impl ResolvedCredentials {
    pub fn new(config: ProviderConfig, credentials: ApiCredentials) -> Self {
        Self {
            api_username: credentials.api_username,
            api_key: credentials.api_key,
            zone_name: config.zone_name,
            api_url: config.api_url,
        }
    }
}

impl fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("api_username", &self.api_username)
            .field("api_key", &"***")
            .field("zone_name", &self.zone_name)
            .field("api_url", &self.api_url)
            .finish()
    }
}

fn string_from_secret_data(
    data: &SecretData,
    key: &str,
    namespace: &str,
    name: &str,
) -> Result<String> {
    let value = data
        .get(key)
        .ok_or_else(|| ProviderError::MissingSecretKey {
            namespace: namespace.to_string(),
            name: name.to_string(),
            key: key.to_string(),
        })?;

    Ok(String::from_utf8_lossy(value).trim().to_string())
}

/// 从 Secret 存储读取 API 凭证
///
/// 必需键 `api-key` 与 `api-username`，值会去掉首尾空白。
pub async fn resolve(
    store: &dyn SecretStore,
    namespace: &str,
    secret_name: &str,
) -> Result<ApiCredentials> {
    let data = store.get_secret(namespace, secret_name).await?;

    let api_key = string_from_secret_data(&data, API_KEY_FIELD, namespace, secret_name)?;
    let api_username = string_from_secret_data(&data, API_USERNAME_FIELD, namespace, secret_name)?;

    Ok(ApiCredentials {
        api_username,
        api_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&str, &str)]) -> MemorySecretStore {
        let store = MemorySecretStore::new();
        store.insert(
            "cert-manager",
            "zone-eu",
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.as_bytes().to_vec()))
                .collect(),
        );
        store
    }

    #[tokio::test]
    async fn test_resolve_trims_values() {
        let store = store_with(&[("api-key", "  k\n"), ("api-username", "\tu ")]);
        let creds = resolve(&store, "cert-manager", "zone-eu").await.unwrap();
        assert_eq!(creds.api_key, "k");
        assert_eq!(creds.api_username, "u");
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let store = store_with(&[("api-username", "u")]);
        let err = resolve(&store, "cert-manager", "zone-eu").await.unwrap_err();
        assert!(err.is_lookup_error());
        assert!(
            matches!(err, ProviderError::MissingSecretKey { ref key, .. } if key == "api-key")
        );
    }

    #[tokio::test]
    async fn test_missing_api_username() {
        let store = store_with(&[("api-key", "k")]);
        let err = resolve(&store, "cert-manager", "zone-eu").await.unwrap_err();
        assert!(
            matches!(err, ProviderError::MissingSecretKey { ref key, .. } if key == "api-username")
        );
    }

    #[tokio::test]
    async fn test_missing_secret() {
        let store = MemorySecretStore::new();
        let err = resolve(&store, "cert-manager", "zone-eu").await.unwrap_err();
        assert!(matches!(err, ProviderError::SecretNotFound { .. }));
    }

    #[test]
    fn test_debug_hides_key() {
        let creds = ResolvedCredentials {
            api_username: "u".to_string(),
            api_key: "secret-value".to_string(),
            zone_name: "example.com".to_string(),
            api_url: "https://api.zone.eu/v2".to_string(),
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret-value"));
        assert!(debug.contains("example.com"));
    }
}
