//! Kubernetes Secret 存储

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};

use crate::error::{ProviderError, Result};
use crate::traits::{SecretData, SecretStore};

/// 通过 Kubernetes API 读取 core/v1 Secret
#[derive(Clone)]
pub struct KubeSecretStore {
    client: Client,
}

impl KubeSecretStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for KubeSecretStore {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<SecretData> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);

        log::debug!("GET secret {namespace}/{name}");

        let secret = api.get(name).await.map_err(|e| match e {
            kube::Error::Api(ref resp) if resp.code == 404 => ProviderError::SecretNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            other => ProviderError::SecretStore {
                namespace: namespace.to_string(),
                name: name.to_string(),
                detail: other.to_string(),
            },
        })?;

        Ok(secret
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, value.0))
            .collect())
    }
}
