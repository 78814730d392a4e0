// ==========================================
// 车间排产引擎 - 任务抽取
// ==========================================
// 职责: 将 Job → Process 展平为可排产任务
// 输入: 订单快照 (调用方顺序) + today
// 输出: PlanTask 列表 (抽取顺序) + 校验提示
// ==========================================
// 过滤规则:
// 1) Done 排除
// 2) Deferred 且 until > today 排除
// 3) hours <= 0 排除 (不产生任何输出)
// 4) hours 非有限值 / workers = 0 视为畸形输入,跳过并记录提示
// 5) 物料引用任一分量为空白 → 视为无需物料,记录提示后照常排产
// ==========================================

use crate::domain::job::{Job, MaterialRef};
use crate::domain::schedule::{ProcessRef, ScheduledTask, ValidationNote};
use crate::domain::types::{ProcessState, TaskStatus};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, instrument};

/// 工序名归一化（合批键）
///
/// 去除首尾空白、压缩内部空白、转小写
pub fn normalize_process_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ==========================================
// PlanTask - 可排产任务
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTask {
    pub process_ref: ProcessRef,
    pub job_name: String,
    pub process_name: String,
    pub batch_key: String,            // 归一化工序名
    pub hours: f64,
    pub workers: u32,
    pub machine: Option<String>,
    pub material: Option<MaterialRef>,
    pub due_date: NaiveDate,
}

impl PlanTask {
    /// 生成排产记录
    pub fn to_record(
        &self,
        status: TaskStatus,
        lanes: Vec<usize>,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> ScheduledTask {
        ScheduledTask {
            process_ref: self.process_ref.clone(),
            job_name: self.job_name.clone(),
            process_name: self.process_name.clone(),
            machine: self.machine.clone(),
            workers: self.workers,
            hours: self.hours,
            due_date: self.due_date,
            lanes,
            start,
            end,
            status,
        }
    }

    /// 生成未排入记录
    pub fn unscheduled(&self, status: TaskStatus) -> ScheduledTask {
        self.to_record(status, Vec::new(), None, None)
    }
}

// ==========================================
// ExtractionResult - 抽取结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub tasks: Vec<PlanTask>,
    pub notes: Vec<ValidationNote>,
    pub done_count: usize,
    pub deferred_count: usize,
    pub zero_hours_count: usize,
}

// ==========================================
// TaskExtractor - 任务抽取器
// ==========================================
pub struct TaskExtractor {
    // 无状态,不需要注入依赖
}

impl TaskExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// 抽取可排产任务
    ///
    /// # 参数
    /// - `jobs`: 订单快照（保持调用方顺序）
    /// - `today`: 排产基准日
    #[instrument(skip(self, jobs), fields(job_count = jobs.len()))]
    pub fn extract(&self, jobs: &[Job], today: NaiveDate) -> ExtractionResult {
        let mut result = ExtractionResult::default();

        for job in jobs {
            for (process_index, process) in job.processes.iter().enumerate() {
                if !process.state.is_schedulable_on(today) {
                    match process.state {
                        ProcessState::Done => result.done_count += 1,
                        _ => result.deferred_count += 1,
                    }
                    continue;
                }

                let subject = format!("{}#{}", job.job_id, process_index);

                if !process.hours.is_finite() {
                    result
                        .notes
                        .push(ValidationNote::new(subject, "工时不是有效数值,已跳过"));
                    continue;
                }
                if process.hours <= 0.0 {
                    result.zero_hours_count += 1;
                    continue;
                }
                if process.workers == 0 {
                    result
                        .notes
                        .push(ValidationNote::new(subject, "所需人数无效或为 0,已跳过"));
                    continue;
                }

                let material = match &process.material {
                    Some(m) if m.is_incomplete() => {
                        result.notes.push(ValidationNote::new(
                            subject,
                            "物料引用不完整,按无需物料处理",
                        ));
                        None
                    }
                    other => other.clone(),
                };

                result.tasks.push(PlanTask {
                    process_ref: ProcessRef::new(job.job_id.clone(), process_index),
                    job_name: job.display_name().to_string(),
                    process_name: process.name.clone(),
                    batch_key: normalize_process_name(&process.name),
                    hours: process.hours,
                    workers: process.workers,
                    machine: process.machine.clone(),
                    material,
                    due_date: job.due_date,
                });
            }
        }

        debug!(
            task_count = result.tasks.len(),
            done = result.done_count,
            deferred = result.deferred_count,
            zero_hours = result.zero_hours_count,
            notes = result.notes.len(),
            "任务抽取完成"
        );

        result
    }
}

impl Default for TaskExtractor {
    fn default() -> Self {
        Self::new()
    }
}
