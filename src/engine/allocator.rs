// ==========================================
// 车间排产引擎 - 时间/资源分配器
// ==========================================
// 职责: 单任务落位: 物料门控 → 人数校验 → 通道组选择 →
//       日历对齐 → 产能校验 → 扣减物料/占用通道
// 输出: ScheduledTask (Scheduled / Blocked / Not Scheduled)
// ==========================================
// 排产策略: 通道独立最早空闲 (per-lane earliest-free)
// - 批次锚点: 仅以通道池状态为下界,不同通道可并行
// - 批次成员: 额外以上一次成功落位的结束时刻为下界,保证同名工序首尾相接
// ==========================================
// 红线:
// - 工序不跨休息、不跨日拆分,放不下就整体顺延到下一子时段/下一天
// - 当日产能不足则顺延到次日;超出排产窗口 → No Capacity,不改动通道状态
// - 物料缺失 → Blocked,本次排产内不重试
// ==========================================

use crate::domain::schedule::ScheduledTask;
use crate::domain::types::TaskStatus;
use crate::engine::batcher::Batch;
use crate::engine::material_gate::MaterialGate;
use crate::engine::staff_pool::{LaneGroup, StaffLanePool};
use crate::engine::task_extractor::PlanTask;
use crate::engine::work_calendar::{hours_to_duration, WorkCalendar};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, instrument, trace};

// ==========================================
// Allocator - 分配器
// ==========================================
pub struct Allocator<'a> {
    calendar: &'a WorkCalendar,
    gate: MaterialGate,
    pool: StaffLanePool,
    horizon_end: NaiveDate,
}

impl<'a> Allocator<'a> {
    /// # 参数
    /// - `calendar`: 工作日历
    /// - `gate`: 物料快照（本次排产私有）
    /// - `pool`: 人员通道池（本次排产私有）
    /// - `horizon_end`: 排产窗口最后一天（含）
    pub fn new(
        calendar: &'a WorkCalendar,
        gate: MaterialGate,
        pool: StaffLanePool,
        horizon_end: NaiveDate,
    ) -> Self {
        Self {
            calendar,
            gate,
            pool,
            horizon_end,
        }
    }

    pub fn pool(&self) -> &StaffLanePool {
        &self.pool
    }

    pub fn gate(&self) -> &MaterialGate {
        &self.gate
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 落位一个批次
    ///
    /// 锚点按通道池状态落位;成员依次以上一次成功落位的结束时刻为下界。
    /// 某个成员未排入时游标保持不变。
    #[instrument(skip(self, batch), fields(batch_key = %batch.anchor.batch_key, size = batch.len()))]
    pub fn place_batch(&mut self, batch: &Batch) -> Vec<ScheduledTask> {
        let mut records = Vec::with_capacity(batch.len());

        let anchor = self.place(&batch.anchor, None);
        let mut cursor = anchor.end;
        records.push(anchor);

        for member in &batch.members {
            let record = self.place(member, cursor);
            if record.end.is_some() {
                cursor = record.end;
            }
            records.push(record);
        }

        records
    }

    /// 落位单个任务
    ///
    /// # 参数
    /// - `task`: 待排任务
    /// - `cursor`: 额外的开工下界（批次成员使用）
    pub fn place(&mut self, task: &PlanTask, cursor: Option<NaiveDateTime>) -> ScheduledTask {
        // 1. 物料门控
        if let Some(material) = &task.material {
            if self.gate.find_available(&material.key()).is_none() {
                debug!(
                    job_id = %task.process_ref.job_id,
                    process_index = task.process_ref.process_index,
                    material = %material.key(),
                    "物料不足,阻断"
                );
                return task.unscheduled(TaskStatus::BlockedNoMaterial);
            }
        }

        // 2. 人数校验
        let required = task.workers as usize;
        let group = match self.pool.earliest_group_start(required) {
            Some(group) => group,
            None => {
                debug!(
                    job_id = %task.process_ref.job_id,
                    required,
                    staff_count = self.pool.staff_count(),
                    "所需人数超过总人数"
                );
                return task.unscheduled(TaskStatus::InsufficientStaff);
            }
        };

        // 3. 日历对齐 + 产能校验
        let duration = hours_to_duration(task.hours);
        let (start, end) = match self.find_slot(&group, duration, cursor) {
            Some(slot) => slot,
            None => {
                debug!(
                    job_id = %task.process_ref.job_id,
                    process_index = task.process_ref.process_index,
                    hours = task.hours,
                    "排产窗口内无可用产能"
                );
                return task.unscheduled(TaskStatus::NoCapacity);
            }
        };

        // 4. 扣减物料 + 占用通道
        if let Some(material) = &task.material {
            let units = self.gate.units_for(material);
            self.gate.consume(&material.key(), units);
        }
        self.pool.assign(&group, start, end);

        trace!(
            job_id = %task.process_ref.job_id,
            process_index = task.process_ref.process_index,
            lanes = ?group.lanes,
            %start,
            %end,
            "任务已排入"
        );

        task.to_record(TaskStatus::Scheduled, group.lanes, Some(start), Some(end))
    }

    /// 为通道组寻找最早可行时段
    ///
    /// 规则（顺序执行）:
    /// 1) 工时超过最长子时段或日工时 → 无解
    /// 2) 从 max(通道组空闲时刻, cursor) 起按日历前推到可工作时刻
    /// 3) 放不进当前子时段 → 从边界处重试
    /// 4) 当日通道产能不足 → 从次日上班时刻重试
    /// 5) 超出排产窗口 → 无解
    fn find_slot(
        &self,
        group: &LaneGroup,
        duration: Duration,
        cursor: Option<NaiveDateTime>,
    ) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if duration > self.calendar.longest_sub_interval()
            || duration > hours_to_duration(self.pool.daily_hours())
        {
            return None;
        }

        let mut lower = match cursor {
            Some(c) => group.ready_at.max(c),
            None => group.ready_at,
        };

        loop {
            let start = self.calendar.next_working_moment(lower)?;
            if start.date() > self.horizon_end {
                return None;
            }

            let boundary = self.calendar.next_boundary(start)?;
            let end = start + duration;

            if end > boundary {
                // 跨休息/下班,整体顺延
                lower = boundary;
                continue;
            }

            if !self.pool.can_fit(group, start, end) {
                // 当日产能已满,顺延到次日
                let next_day = start.date().succ_opt()?;
                lower = self.calendar.day_start(next_day);
                continue;
            }

            return Some((start, end));
        }
    }

    /// 拆出内部状态（通道池、物料快照）
    pub fn into_parts(self) -> (StaffLanePool, MaterialGate) {
        (self.pool, self.gate)
    }
}
