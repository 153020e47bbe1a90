//! zone.eu DNS-01 Challenge Solver
//!
//! 为 cert-manager webhook 提供 solver 实现：
//! - 解析 Issuer 中的 solver 配置
//! - 从 Kubernetes Secret 读取 zone.eu API 凭证
//! - 调用 zone.eu REST API 创建 / 删除 TXT 记录
//!
//! ```no_run
//! use std::sync::Arc;
//! use zone_eu_provider::{MemorySecretStore, SolverOptions, ZoneEuSolver};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let solver = ZoneEuSolver::new(SolverOptions {
//!     group_name: "acme.example.com".to_string(),
//!     ..SolverOptions::default()
//! })?;
//! solver.initialize_with_store(Arc::new(MemorySecretStore::new())).await;
//! # Ok(())
//! # }
//! ```

mod config;
mod credentials;
mod error;
mod http_client;
mod providers;
mod solver;
mod traits;
mod types;

pub use config::{ProviderConfig, load_config};
pub use credentials::{
    API_KEY_FIELD, API_USERNAME_FIELD, ApiCredentials, KubeSecretStore, MemorySecretStore,
    ResolvedCredentials, resolve,
};
pub use error::{ProviderError, Result};
pub use http_client::HttpUtils;
pub use providers::{
    CreateTxtRecordRequest, TxtRecord, TxtRecordListResponse, ZoneEuProvider, find_record_id,
};
pub use solver::{
    ClusterAccess, RecordMutationPolicy, SOLVER_NAME, SolverError, SolverOptions, StartupError,
    ZoneEuSolver,
};
pub use traits::{SecretData, SecretStore, Solver};
pub use types::{ChallengeAction, ChallengeRequest, normalize_fqdn};

/// 重新导出 watch channel，供宿主传入停止信号
pub use tokio::sync::watch;
