//! zone.eu DNS-01 Challenge Solver
//!
//! 每次调用都重新加载配置、重新读取 Secret，调用之间不保存任何状态；
//! 唯一的共享状态是 `initialize` 时写入一次的 Secret 存储句柄。

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use kube::config::{KubeConfigOptions, Kubeconfig};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, watch};

use crate::config::load_config;
use crate::credentials::{KubeSecretStore, ResolvedCredentials, resolve};
use crate::error::ProviderError;
use crate::providers::{ZoneEuProvider, find_record_id};
use crate::traits::{SecretStore, Solver};
use crate::types::{ChallengeRequest, normalize_fqdn};

/// Solver 名称
pub const SOLVER_NAME: &str = "zone-eu";

/// 启动阶段错误
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("GROUP_NAME must be specified")]
    MissingGroupName,
}

/// Solver 操作错误
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// 配置解析或 Secret 读取失败
    #[error("unable to get secret `{namespace}`; {source}")]
    CredentialResolution {
        namespace: String,
        #[source]
        source: ProviderError,
    },

    #[error("unable to get DNS records {0}")]
    ListFailed(#[source] ProviderError),

    #[error("unable to unmarshal response {0}")]
    DecodeFailed(#[source] ProviderError),

    /// 仅在 `RecordMutationPolicy::Strict` 下返回
    #[error("unable to {operation} TXT record: {source}")]
    RecordMutation {
        operation: &'static str,
        #[source]
        source: ProviderError,
    },

    #[error("unable to initialize cluster client: {detail}")]
    Init { detail: String },
}

impl SolverError {
    /// 简短的失败原因，用于 webhook 响应的 `reason` 字段
    pub fn reason(&self) -> &'static str {
        match self {
            Self::CredentialResolution { .. } => "credential resolution",
            Self::ListFailed(_) => "list failed",
            Self::DecodeFailed(_) => "decode failed",
            Self::RecordMutation { .. } => "record mutation",
            Self::Init { .. } => "initialization",
        }
    }
}

/// 创建 / 删除 TXT 记录失败时的处理策略
///
/// `BestEffort` 只记录日志，操作仍然报告成功；`Strict` 把错误返回给调用方。
/// 默认 `BestEffort`，是否切换需要产品确认。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordMutationPolicy {
    #[default]
    BestEffort,
    Strict,
}

/// Solver 构造参数
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    /// webhook 的 API group 名称，不能为空
    pub group_name: String,
    pub record_mutation: RecordMutationPolicy,
}

/// 集群访问方式
#[derive(Debug, Clone)]
pub enum ClusterAccess {
    /// 集群内 ServiceAccount 或 `KUBECONFIG`
    Inferred,
    /// kubeconfig YAML 文本
    Kubeconfig(String),
    /// kubeconfig 文件路径
    KubeconfigPath(PathBuf),
    /// 已构造好的配置
    Config(kube::Config),
}

impl ClusterAccess {
    async fn into_client(self) -> Result<kube::Client, String> {
        let config = match self {
            Self::Inferred => kube::Config::infer().await.map_err(|e| e.to_string())?,
            Self::Kubeconfig(yaml) => {
                let kubeconfig = Kubeconfig::from_yaml(&yaml).map_err(|e| e.to_string())?;
                kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                    .await
                    .map_err(|e| e.to_string())?
            }
            Self::KubeconfigPath(path) => {
                let kubeconfig = Kubeconfig::read_from(&path).map_err(|e| e.to_string())?;
                kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                    .await
                    .map_err(|e| e.to_string())?
            }
            Self::Config(config) => config,
        };

        kube::Client::try_from(config).map_err(|e| e.to_string())
    }
}

/// zone.eu Solver
pub struct ZoneEuSolver {
    options: SolverOptions,
    client: Client,
    secret_store: RwLock<Option<Arc<dyn SecretStore>>>,
}

impl ZoneEuSolver {
    /// 创建 Solver，group 名称为空时启动失败
    pub fn new(options: SolverOptions) -> Result<Self, StartupError> {
        if options.group_name.trim().is_empty() {
            return Err(StartupError::MissingGroupName);
        }

        Ok(Self {
            options,
            client: Client::new(),
            secret_store: RwLock::new(None),
        })
    }

    pub fn group_name(&self) -> &str {
        &self.options.group_name
    }

    pub fn record_mutation_policy(&self) -> RecordMutationPolicy {
        self.options.record_mutation
    }

    /// 直接注入 Secret 存储
    pub async fn initialize_with_store(&self, store: Arc<dyn SecretStore>) {
        *self.secret_store.write().await = Some(store);
    }

    pub async fn is_initialized(&self) -> bool {
        self.secret_store.read().await.is_some()
    }

    /// 合并请求配置和 Secret，得到本次请求使用的凭证
    async fn client_config(
        &self,
        ch: &ChallengeRequest,
    ) -> Result<ResolvedCredentials, ProviderError> {
        let store = self
            .secret_store
            .read()
            .await
            .clone()
            .ok_or(ProviderError::NotInitialized)?;

        let config = load_config(ch.config.as_ref())?;
        let credentials = resolve(&*store, &ch.resource_namespace, &config.secret_ref).await?;

        Ok(ResolvedCredentials::new(config, credentials))
    }

    async fn provider_for(&self, ch: &ChallengeRequest) -> Result<ZoneEuProvider, SolverError> {
        let credentials =
            self.client_config(ch)
                .await
                .map_err(|source| SolverError::CredentialResolution {
                    namespace: ch.resource_namespace.clone(),
                    source,
                })?;

        Ok(ZoneEuProvider::new(self.client.clone(), credentials))
    }

    /// 按策略处理创建 / 删除失败
    fn record_mutation_failed(
        &self,
        operation: &'static str,
        source: ProviderError,
    ) -> Result<(), SolverError> {
        log::error!("unable to {operation} TXT record: {source}");

        match self.options.record_mutation {
            RecordMutationPolicy::BestEffort => Ok(()),
            RecordMutationPolicy::Strict => Err(SolverError::RecordMutation { operation, source }),
        }
    }
}

#[async_trait]
impl Solver for ZoneEuSolver {
    fn name(&self) -> &str {
        SOLVER_NAME
    }

    async fn present(&self, ch: &ChallengeRequest) -> Result<(), SolverError> {
        log::debug!(
            "call function Present: namespace={}, zone={}, fqdn={}",
            ch.resource_namespace,
            ch.resolved_zone,
            ch.resolved_fqdn
        );

        let provider = self.provider_for(ch).await?;
        let name = normalize_fqdn(&ch.resolved_fqdn);

        match provider.create_txt_record(name, &ch.key).await {
            Ok(body) => log::info!("Added TXT record result: {}", String::from_utf8_lossy(&body)),
            Err(e) => self.record_mutation_failed("create", e)?,
        }

        log::info!("Presented txt record {}", ch.resolved_fqdn);
        Ok(())
    }

    async fn clean_up(&self, ch: &ChallengeRequest) -> Result<(), SolverError> {
        log::debug!(
            "call function CleanUp: namespace={}, zone={}, fqdn={}",
            ch.resource_namespace,
            ch.resolved_zone,
            ch.resolved_fqdn
        );

        let provider = self.provider_for(ch).await?;

        let body = provider
            .list_txt_records()
            .await
            .map_err(SolverError::ListFailed)?;
        let list = ZoneEuProvider::decode_txt_records(&body).map_err(SolverError::DecodeFailed)?;

        let name = normalize_fqdn(&ch.resolved_fqdn);
        let record_id = find_record_id(&list.records, name);
        if record_id.is_empty() {
            log::warn!("no TXT record named {name} found, deleting with empty id");
        }

        match provider.delete_txt_record(record_id).await {
            Ok(body) => log::info!("TXT record deleted {}", String::from_utf8_lossy(&body)),
            Err(e) => self.record_mutation_failed("delete", e)?,
        }

        Ok(())
    }

    async fn initialize(
        &self,
        access: ClusterAccess,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), SolverError> {
        let client = access
            .into_client()
            .await
            .map_err(|detail| SolverError::Init { detail })?;

        self.initialize_with_store(Arc::new(KubeSecretStore::new(client)))
            .await;
        log::info!("[{SOLVER_NAME}] cluster client initialized");

        tokio::spawn(async move {
            while shutdown.changed().await.is_ok() {
                if *shutdown.borrow() {
                    log::info!("[{SOLVER_NAME}] shutdown signal received");
                    break;
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solver() -> ZoneEuSolver {
        ZoneEuSolver::new(SolverOptions {
            group_name: "acme.example.com".to_string(),
            ..SolverOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn test_missing_group_name() {
        for group_name in ["", "   "] {
            let result = ZoneEuSolver::new(SolverOptions {
                group_name: group_name.to_string(),
                ..SolverOptions::default()
            });
            assert!(matches!(result, Err(StartupError::MissingGroupName)));
        }
    }

    #[test]
    fn test_name_and_defaults() {
        let solver = solver();
        assert_eq!(solver.name(), "zone-eu");
        assert_eq!(solver.group_name(), "acme.example.com");
        assert_eq!(
            solver.record_mutation_policy(),
            RecordMutationPolicy::BestEffort
        );
    }

    #[test]
    fn test_policy_wire_names() {
        let strict: RecordMutationPolicy = serde_json::from_str(r#""strict""#).unwrap();
        let best: RecordMutationPolicy = serde_json::from_str(r#""best-effort""#).unwrap();
        assert_eq!(strict, RecordMutationPolicy::Strict);
        assert_eq!(best, RecordMutationPolicy::BestEffort);
    }

    #[tokio::test]
    async fn test_initialize_malformed_kubeconfig() {
        let solver = solver();
        let (_tx, rx) = watch::channel(false);

        let result = solver
            .initialize(
                ClusterAccess::Kubeconfig("clusters: [unterminated".to_string()),
                rx,
            )
            .await;

        assert!(matches!(result, Err(SolverError::Init { .. })));
        assert!(!solver.is_initialized().await);
    }

    #[tokio::test]
    async fn test_initialize_missing_kubeconfig_file() {
        let solver = solver();
        let (_tx, rx) = watch::channel(false);

        let result = solver
            .initialize(
                ClusterAccess::KubeconfigPath(PathBuf::from("/nonexistent/kubeconfig")),
                rx,
            )
            .await;

        assert!(matches!(result, Err(SolverError::Init { .. })));
        assert!(!solver.is_initialized().await);
    }

    #[tokio::test]
    async fn test_present_before_initialize() {
        let solver = solver();
        let err = solver
            .present(&ChallengeRequest::default())
            .await
            .unwrap_err();

        assert_eq!(err.reason(), "credential resolution");
        assert!(matches!(
            err,
            SolverError::CredentialResolution {
                source: ProviderError::NotInitialized,
                ..
            }
        ));
    }
}
