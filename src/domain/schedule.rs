// ==========================================
// 车间排产引擎 - 排产结果领域模型
// ==========================================
// 职责: 定义排产记录、排产表行、排产报告、校验提示
// 红线: 每条记录都携带 (job_id, process_index),供完工/延后回写使用
// ==========================================

use crate::domain::types::{Decision, DueStatus, TaskStatus};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// ProcessRef - 工序稳定标识
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessRef {
    pub job_id: String,
    pub process_index: usize,
}

impl ProcessRef {
    pub fn new(job_id: impl Into<String>, process_index: usize) -> Self {
        Self {
            job_id: job_id.into(),
            process_index,
        }
    }
}

// ==========================================
// ScheduledTask - 单个工序的排产记录
// ==========================================
// 未排入时 start/end 为空,lanes 为空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub process_ref: ProcessRef,
    pub job_name: String,
    pub process_name: String,
    pub machine: Option<String>,
    pub workers: u32,
    pub hours: f64,
    pub due_date: NaiveDate,
    pub lanes: Vec<usize>,              // 占用的人员通道 (0-based)
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub status: TaskStatus,
}

impl ScheduledTask {
    pub fn is_scheduled(&self) -> bool {
        self.status.is_scheduled()
    }
}

// ==========================================
// ScheduleRow - 排产表行 (对外输出)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date: Option<NaiveDate>,
    pub job_id: String,
    pub process_index: usize,
    pub job: String,
    pub process: String,
    pub machine: String,
    pub workers: u32,
    pub hours: f64,
    pub staff: String,                  // 通道展示 ("1, 2" 或人员姓名)
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    pub due_status: DueStatus,
}

impl ScheduleRow {
    pub fn process_ref(&self) -> ProcessRef {
        ProcessRef::new(self.job_id.clone(), self.process_index)
    }
}

// ==========================================
// CapacitySummary - 产能汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySummary {
    pub total_used_hours: f64,      // 全部通道已用工时
    pub total_capacity_hours: f64,  // staff_count × daily_hours × horizon_days
    pub utilization: f64,           // 0.0 - 1.0
}

impl CapacitySummary {
    pub fn new(total_used_hours: f64, total_capacity_hours: f64) -> Self {
        let utilization = if total_capacity_hours > 0.0 {
            total_used_hours / total_capacity_hours
        } else {
            0.0
        };
        Self {
            total_used_hours,
            total_capacity_hours,
            utilization,
        }
    }
}

// ==========================================
// ValidationNote - 输入校验提示
// ==========================================
// 畸形输入被跳过/裁剪时记录原因,不中断排产
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationNote {
    pub subject: String, // 例如 "J-1#2" 或 "break 12:00-11:00"
    pub reason: String,
}

impl ValidationNote {
    pub fn new(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

// ==========================================
// PlanReport - 排产报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub plan_date: NaiveDate,
    pub rows: Vec<ScheduleRow>,             // 已排入,按开始时间排序
    pub unscheduled: Vec<ScheduleRow>,      // 未排入,按产生顺序
    pub summary: CapacitySummary,
    pub validation_notes: Vec<ValidationNote>,
}

impl PlanReport {
    pub fn scheduled_count(&self) -> usize {
        self.rows.len()
    }

    pub fn unscheduled_count(&self) -> usize {
        self.unscheduled.len()
    }

    /// 按工序标识查找行 (已排入优先)
    pub fn find(&self, job_id: &str, process_index: usize) -> Option<&ScheduleRow> {
        self.rows
            .iter()
            .chain(self.unscheduled.iter())
            .find(|r| r.job_id == job_id && r.process_index == process_index)
    }
}

// ==========================================
// ProcessDecision - 人工决策回写
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDecision {
    pub job_id: String,
    pub process_index: usize,
    pub decision: Decision,
}
