//! 应用状态

use std::sync::Arc;

use zone_eu_provider::Solver;

use crate::error::ApiError;

/// 所有 worker 共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub group_name: String,
    pub solver: Arc<dyn Solver>,
}

impl AppState {
    pub fn new(group_name: impl Into<String>, solver: Arc<dyn Solver>) -> Self {
        Self {
            group_name: group_name.into(),
            solver,
        }
    }

    /// 校验请求路径中的 group
    pub fn ensure_group(&self, group: &str) -> Result<(), ApiError> {
        if group == self.group_name {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("API group {group}")))
        }
    }

    /// 校验请求路径中的 group 和 solver 名称
    pub fn ensure_solver(&self, group: &str, solver: &str) -> Result<(), ApiError> {
        self.ensure_group(group)?;
        if solver == self.solver.name() {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("solver {group}/{solver}")))
        }
    }
}
