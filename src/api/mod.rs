// ==========================================
// 车间排产引擎 - API 层
// ==========================================
// 职责: 提供排产接口,供展示层/命令行调用
// ==========================================

pub mod error;
pub mod feedback;
pub mod plan_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use feedback::{apply_decisions, next_business_day};
pub use plan_api::PlanApi;
