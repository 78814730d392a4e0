// ==========================================
// 车间排产引擎 - 排产 API
// ==========================================
// 职责: 面向展示层的排产入口与决策回写入口
// 红线: 每次调用独立处理输入快照,不持有跨调用可变状态
// ==========================================

use crate::api::error::ApiResult;
use crate::api::feedback;
use crate::config::PlannerConfigReader;
use crate::domain::job::Job;
use crate::domain::schedule::{PlanReport, ProcessDecision};
use crate::domain::snapshot::PlanningSnapshot;
use crate::engine::PlanningOrchestrator;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use std::sync::Arc;

// ==========================================
// PlanApi - 排产 API
// ==========================================

/// 排产API
///
/// 职责：
/// 1. 排产计算（快照 → 排产报告）
/// 2. 快照加载（JSON）
/// 3. 人工决策回写（完工/延后）
pub struct PlanApi<C>
where
    C: PlannerConfigReader,
{
    orchestrator: PlanningOrchestrator<C>,
}

impl<C> PlanApi<C>
where
    C: PlannerConfigReader,
{
    /// 创建新的PlanApi实例
    pub fn new(config: Arc<C>) -> Self {
        Self {
            orchestrator: PlanningOrchestrator::new(config),
        }
    }

    /// 执行排产
    ///
    /// # 参数
    /// - snapshot: 输入快照
    ///
    /// # 返回
    /// - Ok(PlanReport): 排产报告
    /// - Err(ApiError): 配置无效
    pub fn plan(&self, snapshot: &PlanningSnapshot) -> ApiResult<PlanReport> {
        Ok(self.orchestrator.plan(snapshot)?)
    }

    /// 从 JSON 文本执行排产
    pub fn plan_json(&self, raw: &str) -> ApiResult<PlanReport> {
        let snapshot: PlanningSnapshot = serde_json::from_str(raw)?;
        self.plan(&snapshot)
    }

    /// 从 JSON 文件加载快照
    pub fn load_snapshot(path: impl AsRef<Path>) -> ApiResult<PlanningSnapshot> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// 人工决策回写
    ///
    /// # 返回
    /// - Ok(usize): 应用的决策条数
    /// - Err(ApiError): 存在无效引用（不做任何修改）
    pub fn apply_decisions(
        &self,
        jobs: &mut [Job],
        decisions: &[ProcessDecision],
        today: NaiveDate,
    ) -> ApiResult<usize> {
        feedback::apply_decisions(jobs, decisions, today)
    }
}
