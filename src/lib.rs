// ==========================================
// 车间排产引擎 - 核心库
// ==========================================
// 输入: 订单/工序/物料库存快照 + 排产配置
// 输出: 当日排产报告 (含阻塞原因、交期状态、产能汇总)
// 系统定位: 决策支持 (人工审阅后回写完工/延后)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排产规则
pub mod engine;

// 配置层 - 排产配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 排产接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Decision, DueStatus, ProcessState, TaskStatus};

// 领域实体
pub use domain::{
    CapacitySummary, Job, MaterialKey, MaterialRef, MaterialStock, PlanReport, PlanningSnapshot,
    Process, ProcessDecision, ProcessRef, ScheduleRow, ScheduledTask, ValidationNote,
};

// 配置
pub use config::{ConfigError, ConfigManager, PlannerConfig, PlannerConfigReader};

// 引擎
pub use engine::PlanningOrchestrator;

// API
pub use api::{ApiError, ApiResult, PlanApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "车间排产引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
