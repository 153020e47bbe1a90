//! 内存 Secret 存储

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{SecretData, SecretStore};

/// 进程内 Secret 存储，键为 (namespace, name)
#[derive(Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<(String, String), SecretData>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入或覆盖一个 Secret
    pub fn insert(&self, namespace: &str, name: &str, data: SecretData) {
        let mut secrets = self
            .secrets
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        secrets.insert((namespace.to_string(), name.to_string()), data);
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<SecretData> {
        let secrets = self
            .secrets
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| ProviderError::SecretNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }
}
