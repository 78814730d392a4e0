// ==========================================
// 车间排产引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod job;
pub mod material;
pub mod schedule;
pub mod snapshot;
pub mod types;

// 重导出核心类型
pub use job::{Job, MaterialRef, Process};
pub use material::{MaterialKey, MaterialStock};
pub use schedule::{
    CapacitySummary, PlanReport, ProcessDecision, ProcessRef, ScheduleRow, ScheduledTask,
    ValidationNote,
};
pub use snapshot::PlanningSnapshot;
pub use types::{Decision, DueStatus, ProcessState, TaskStatus};
