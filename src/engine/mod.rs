// ==========================================
// 车间排产引擎 - 引擎层
// ==========================================
// 职责: 实现排产规则,不做 I/O
// 红线: 不可行性一律输出状态值,不抛错误
// ==========================================

pub mod allocator;
pub mod assembler;
pub mod batcher;
pub mod material_gate;
pub mod orchestrator;
pub mod staff_pool;
pub mod task_extractor;
pub mod work_calendar;

// 重导出核心引擎
pub use allocator::Allocator;
pub use assembler::{due_status, ScheduleAssembler};
pub use batcher::{Batch, TaskBatcher};
pub use material_gate::MaterialGate;
pub use orchestrator::PlanningOrchestrator;
pub use staff_pool::{LaneGroup, StaffLane, StaffLanePool};
pub use task_extractor::{normalize_process_name, ExtractionResult, PlanTask, TaskExtractor};
pub use work_calendar::{duration_to_hours, hours_to_duration, SubInterval, WorkCalendar};
