// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的快照构造、配置构造、时间构造等功能
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shop_floor_planner::config::{BreakWindow, CalendarConfig, PlannerConfig};
use shop_floor_planner::domain::{Job, MaterialRef, PlanningSnapshot, Process};
use shop_floor_planner::{ConfigManager, PlanApi, PlanReport};
use std::sync::Arc;

/// 测试基准日 (2026-03-10 周二)
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + chrono::Duration::days(days)
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// today 当日的 h:m
pub fn at(h: u32, m: u32) -> NaiveDateTime {
    today().and_time(hm(h, m))
}

/// 指定日期的 h:m
pub fn on(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    date.and_time(hm(h, m))
}

/// 创建单工序订单
pub fn single_process_job(job_id: &str, due_date: NaiveDate, process: Process) -> Job {
    Job {
        job_id: job_id.to_string(),
        name: format!("Job {}", job_id),
        due_date,
        quantity: 1,
        processes: vec![process],
    }
}

/// 创建多工序订单
pub fn job(job_id: &str, due_date: NaiveDate, processes: Vec<Process>) -> Job {
    Job {
        job_id: job_id.to_string(),
        name: format!("Job {}", job_id),
        due_date,
        quantity: 1,
        processes,
    }
}

pub fn board_a4() -> MaterialRef {
    MaterialRef::new("Board", "A4", "32")
}

/// 默认配置 (2 人 × 8 小时, 09:00-17:00, 13:00-14:00 休息)
pub fn default_config() -> PlannerConfig {
    PlannerConfig::default()
}

/// 无休息日历
pub fn calendar_without_breaks(start: NaiveTime, end: NaiveTime) -> CalendarConfig {
    CalendarConfig {
        work_start: start,
        work_end: end,
        breaks: Vec::new(),
    }
}

pub fn calendar_with_break(break_start: NaiveTime, break_end: NaiveTime) -> CalendarConfig {
    CalendarConfig {
        work_start: hm(9, 0),
        work_end: hm(17, 0),
        breaks: vec![BreakWindow::new(break_start, break_end)],
    }
}

/// 使用给定配置执行排产
pub fn run_plan(config: PlannerConfig, snapshot: &PlanningSnapshot) -> PlanReport {
    let manager = ConfigManager::new(config).expect("配置应合法");
    let api = PlanApi::new(Arc::new(manager));
    api.plan(snapshot).expect("排产应成功")
}

/// 使用默认配置执行排产
pub fn run_default(snapshot: &PlanningSnapshot) -> PlanReport {
    run_plan(default_config(), snapshot)
}
