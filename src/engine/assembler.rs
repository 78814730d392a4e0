// ==========================================
// 车间排产引擎 - 排产表组装
// ==========================================
// 职责: 按开始时间排序已排入记录,附加交期状态,生成排产表
// 输入: 分配器产出的 ScheduledTask 列表 (产生顺序)
// 输出: PlanReport
// ==========================================
// 交期状态判定 (顺序执行,命中即返回):
// 1) due_date < today             → OVERDUE
// 2) due_date <= today + N (N=1)  → NEAR DUE
// 3) 其他                         → OK
// ==========================================

use crate::domain::schedule::{
    CapacitySummary, PlanReport, ScheduleRow, ScheduledTask, ValidationNote,
};
use crate::domain::types::DueStatus;
use chrono::{Duration, NaiveDate};

/// 判定交期状态
///
/// 临期截止日超出日期范围时,视为所有未逾期交期都在阈值内
pub fn due_status(due_date: NaiveDate, today: NaiveDate, near_due_days: i64) -> DueStatus {
    if due_date < today {
        return DueStatus::Overdue;
    }

    let near_due_until = Duration::try_days(near_due_days).and_then(|d| today.checked_add_signed(d));
    let is_near = match near_due_until {
        Some(until) => due_date <= until,
        None => near_due_days > 0,
    };

    if is_near {
        DueStatus::NearDue
    } else {
        DueStatus::Ok
    }
}

// ==========================================
// ScheduleAssembler - 排产表组装器
// ==========================================
pub struct ScheduleAssembler {
    today: NaiveDate,
    near_due_days: i64,
    staff_names: Vec<String>,
}

impl ScheduleAssembler {
    /// # 参数
    /// - `today`: 交期判定基准日
    /// - `near_due_days`: 临期阈值（天）
    /// - `staff_names`: 通道展示名称（为空时显示 1-based 序号）
    pub fn new(today: NaiveDate, near_due_days: i64, staff_names: Vec<String>) -> Self {
        Self {
            today,
            near_due_days,
            staff_names,
        }
    }

    /// 组装排产报告
    ///
    /// 已排入记录按开始时间稳定排序（同一时刻保持产生顺序）,
    /// 未排入记录单独列出,保持产生顺序
    pub fn assemble(
        &self,
        records: Vec<ScheduledTask>,
        summary: CapacitySummary,
        validation_notes: Vec<ValidationNote>,
    ) -> PlanReport {
        let (mut scheduled, unscheduled): (Vec<_>, Vec<_>) =
            records.into_iter().partition(ScheduledTask::is_scheduled);

        scheduled.sort_by_key(|r| r.start);

        PlanReport {
            plan_date: self.today,
            rows: scheduled.iter().map(|r| self.to_row(r)).collect(),
            unscheduled: unscheduled.iter().map(|r| self.to_row(r)).collect(),
            summary,
            validation_notes,
        }
    }

    /// 记录 → 排产表行
    pub fn to_row(&self, record: &ScheduledTask) -> ScheduleRow {
        ScheduleRow {
            date: record.start.map(|s| s.date()),
            job_id: record.process_ref.job_id.clone(),
            process_index: record.process_ref.process_index,
            job: record.job_name.clone(),
            process: record.process_name.clone(),
            machine: record.machine.clone().unwrap_or_default(),
            workers: record.workers,
            hours: record.hours,
            staff: self.lane_labels(&record.lanes),
            start: record.start,
            end: record.end,
            due_date: record.due_date,
            status: record.status,
            due_status: due_status(record.due_date, self.today, self.near_due_days),
        }
    }

    /// 通道展示文本: 配置了姓名时用姓名,否则 1-based 序号
    fn lane_labels(&self, lanes: &[usize]) -> String {
        lanes
            .iter()
            .map(|&i| match self.staff_names.get(i) {
                Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                _ => (i + 1).to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
