//! 对外抽象 Trait

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Result;
use crate::solver::{ClusterAccess, SolverError};
use crate::types::ChallengeRequest;

/// Secret 内容：键 -> 原始字节
pub type SecretData = BTreeMap<String, Vec<u8>>;

/// 按命名空间存放的 Secret 存储
///
/// 实现:
/// - `KubeSecretStore`: Kubernetes core/v1 Secret
/// - `MemorySecretStore`: 进程内存（测试、本地调试）
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// 读取单个 Secret，只尝试一次
    ///
    /// # Arguments
    /// * `namespace` - 命名空间
    /// * `name` - Secret 名称
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<SecretData>;
}

/// DNS-01 Challenge Solver
///
/// cert-manager webhook 调用的四个操作。
#[async_trait]
pub trait Solver: Send + Sync {
    /// Solver 名称，即 webhook 路由中的资源名
    fn name(&self) -> &str;

    /// 创建 TXT 记录
    async fn present(&self, ch: &ChallengeRequest) -> std::result::Result<(), SolverError>;

    /// 删除 TXT 记录
    async fn clean_up(&self, ch: &ChallengeRequest) -> std::result::Result<(), SolverError>;

    /// 建立集群访问句柄，在 present / clean_up 之前调用一次
    async fn initialize(
        &self,
        access: ClusterAccess,
        shutdown: watch::Receiver<bool>,
    ) -> std::result::Result<(), SolverError>;
}
