// ==========================================
// 车间排产引擎 - 领域类型定义
// ==========================================
// 职责: 工序生命周期、排产结果状态、交期状态、人工决策
// 红线: 不可行性一律以状态值表达,不以错误抛出
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工序生命周期 (Process State)
// ==========================================
// Pending → (Scheduled: 仅本次结果, 不落库) → Done | Deferred
// 状态由调用方在审阅排产结果后写回,引擎只读
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    Pending,                       // 待排
    Done,                          // 已完成 (永久排除)
    Deferred { until: NaiveDate }, // 延后至指定日期
}

impl Default for ProcessState {
    fn default() -> Self {
        ProcessState::Pending
    }
}

impl ProcessState {
    /// 判断工序在 `today` 是否可参与排产
    ///
    /// - Pending: 可排
    /// - Done: 不可排
    /// - Deferred: until > today 时不可排, 到期后重新可排
    pub fn is_schedulable_on(&self, today: NaiveDate) -> bool {
        match self {
            ProcessState::Pending => true,
            ProcessState::Done => false,
            ProcessState::Deferred { until } => *until <= today,
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessState::Pending => write!(f, "PENDING"),
            ProcessState::Done => write!(f, "DONE"),
            ProcessState::Deferred { until } => write!(f, "DEFERRED({})", until),
        }
    }
}

// ==========================================
// 排产结果状态 (Task Status)
// ==========================================
// 序列化格式与排产表展示文本一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "SCHEDULED")]
    Scheduled, // 已排入
    #[serde(rename = "BLOCKED: No Material")]
    BlockedNoMaterial, // 物料阻断
    #[serde(rename = "NOT SCHEDULED: Insufficient Staff")]
    InsufficientStaff, // 所需人数超过总人数
    #[serde(rename = "NOT SCHEDULED: No Capacity")]
    NoCapacity, // 排产窗口内无可用产能
}

impl TaskStatus {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, TaskStatus::Scheduled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Scheduled => write!(f, "SCHEDULED"),
            TaskStatus::BlockedNoMaterial => write!(f, "BLOCKED: No Material"),
            TaskStatus::InsufficientStaff => write!(f, "NOT SCHEDULED: Insufficient Staff"),
            TaskStatus::NoCapacity => write!(f, "NOT SCHEDULED: No Capacity"),
        }
    }
}

// ==========================================
// 交期状态 (Due Status)
// ==========================================
// 顺序: Ok < NearDue < Overdue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DueStatus {
    #[serde(rename = "OK")]
    Ok, // 正常
    #[serde(rename = "NEAR DUE")]
    NearDue, // 临期
    #[serde(rename = "OVERDUE")]
    Overdue, // 超期
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueStatus::Ok => write!(f, "OK"),
            DueStatus::NearDue => write!(f, "NEAR DUE"),
            DueStatus::Overdue => write!(f, "OVERDUE"),
        }
    }
}

// ==========================================
// 人工决策 (Decision)
// ==========================================
// 调用方审阅排产表后提交
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Done,     // 标记完成
    Deferred, // 延后至下一工作日
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Done => write!(f, "DONE"),
            Decision::Deferred => write!(f, "DEFERRED"),
        }
    }
}
