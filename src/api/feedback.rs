// ==========================================
// 车间排产引擎 - 人工决策回写
// ==========================================
// 职责: 将审阅后的 {job_id, process_index, decision} 应用到调用方持有的订单列表
// 红线: 引擎本身不调用此模块;落库由调用方负责
// ==========================================
// 回写规则:
// - Done     → ProcessState::Done (后续排产永久排除)
// - Deferred → ProcessState::Deferred { until: today 之后的下一个工作日 (跳过周六/周日) }
// - 先整体校验再应用,任一引用无效则一条都不改
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::job::Job;
use crate::domain::schedule::ProcessDecision;
use crate::domain::types::{Decision, ProcessState};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::info;

/// today 之后的下一个工作日（周一至周五）
pub fn next_business_day(today: NaiveDate) -> NaiveDate {
    let mut day = today + Duration::days(1);
    while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        day += Duration::days(1);
    }
    day
}

/// 应用人工决策
///
/// # 参数
/// - `jobs`: 调用方持有的订单列表（会被修改）
/// - `decisions`: 决策列表
/// - `today`: 决策日期
///
/// # 返回
/// - Ok(usize): 应用的决策条数
/// - Err(ApiError): 存在无效引用（此时不做任何修改）
pub fn apply_decisions(
    jobs: &mut [Job],
    decisions: &[ProcessDecision],
    today: NaiveDate,
) -> ApiResult<usize> {
    // 1. 校验全部引用
    let mut targets = Vec::with_capacity(decisions.len());
    for decision in decisions {
        let job_pos = jobs
            .iter()
            .position(|j| j.job_id == decision.job_id)
            .ok_or_else(|| ApiError::UnknownJob(decision.job_id.clone()))?;

        let process_count = jobs[job_pos].processes.len();
        if decision.process_index >= process_count {
            return Err(ApiError::ProcessIndexOutOfRange {
                job_id: decision.job_id.clone(),
                process_index: decision.process_index,
                process_count,
            });
        }
        targets.push((job_pos, decision.process_index, decision.decision));
    }

    // 2. 应用
    let deferred_until = next_business_day(today);
    for (job_pos, process_index, decision) in &targets {
        let process = &mut jobs[*job_pos].processes[*process_index];
        process.state = match decision {
            Decision::Done => ProcessState::Done,
            Decision::Deferred => ProcessState::Deferred {
                until: deferred_until,
            },
        };
    }

    info!(
        applied = targets.len(),
        deferred_until = %deferred_until,
        "人工决策回写完成"
    );

    Ok(targets.len())
}
