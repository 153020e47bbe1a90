//! 配置模块
//!
//! 从 TOML 文件加载，环境变量覆盖。文件不存在时使用默认值。

use std::path::{Path, PathBuf};

use serde::Deserialize;
use zone_eu_provider::{ClusterAccess, RecordMutationPolicy, SolverOptions};

/// 默认配置文件路径
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("读取配置文件 {path} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析配置文件失败: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("环境变量 {name} 无效: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("TLS 配置不完整: cert_file 和 key_file 必须同时配置")]
    IncompleteTls,
}

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub tls: TlsConfig,
    pub webhook: WebhookConfig,
    pub kubernetes: KubernetesConfig,
    pub logging: LoggingConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 0 表示使用 CPU 核数
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 443,
            workers: 0,
        }
    }
}

/// TLS 证书配置（PEM）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub cert_file: Option<PathBuf>,
    pub key_file: Option<PathBuf>,
}

/// Webhook 配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// API group 名称，对应 Issuer 中的 `groupName`
    pub group_name: String,
    pub record_mutation: RecordMutationPolicy,
}

/// Kubernetes 访问配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KubernetesConfig {
    /// kubeconfig 路径，不配置时使用集群内配置
    pub kubeconfig: Option<PathBuf>,
}

/// 日志配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 输出 JSON 格式日志
    pub json: bool,
}

impl AppConfig {
    /// 加载配置: `CONFIG_PATH` 指定的文件（默认 `config.toml`），再应用环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 应用环境变量覆盖
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(group_name) = lookup("GROUP_NAME") {
            self.webhook.group_name = group_name;
        }
        if let Some(host) = lookup("SOLVER_BIND_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SOLVER_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "SOLVER_PORT",
                value: port,
            })?;
        }
        if let Some(cert) = lookup("TLS_CERT_FILE") {
            self.tls.cert_file = Some(cert.into());
        }
        if let Some(key) = lookup("TLS_KEY_FILE") {
            self.tls.key_file = Some(key.into());
        }
        if let Some(kubeconfig) = lookup("KUBECONFIG_PATH") {
            self.kubernetes.kubeconfig = Some(kubeconfig.into());
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tls.cert_file.is_some() != self.tls.key_file.is_some() {
            return Err(ConfigError::IncompleteTls);
        }
        Ok(())
    }

    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            group_name: self.webhook.group_name.clone(),
            record_mutation: self.webhook.record_mutation,
        }
    }

    pub fn cluster_access(&self) -> ClusterAccess {
        match &self.kubernetes.kubeconfig {
            Some(path) => ClusterAccess::KubeconfigPath(path.clone()),
            None => ClusterAccess::Inferred,
        }
    }
}
