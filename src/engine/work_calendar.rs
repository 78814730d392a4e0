// ==========================================
// 车间排产引擎 - 工作日历
// ==========================================
// 职责: 工作时段与休息时段建模,计算可用子时段
// 输入: CalendarConfig (每天相同)
// 输出: 下一个可工作时刻 / 下一个边界 (休息开始或下班)
// 红线: 工序不跨休息、不跨日拆分
// ==========================================
// 休息时段规范化规则:
// 1) end <= start 的休息时段丢弃并记录提示
// 2) 超出 [work_start, work_end) 的部分裁剪,裁剪后为空则丢弃
// 3) 重叠或相接的休息时段合并
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::planner_config::{BreakWindow, CalendarConfig};
use crate::domain::schedule::ValidationNote;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

/// 工时 → 时长（毫秒精度）
pub fn hours_to_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

/// 时长 → 工时
pub fn duration_to_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 3_600_000.0
}

// ==========================================
// SubInterval - 子时段 [start, end)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SubInterval {
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }
}

// ==========================================
// WorkCalendar - 工作日历
// ==========================================
#[derive(Debug, Clone)]
pub struct WorkCalendar {
    work_start: NaiveTime,
    work_end: NaiveTime,
    breaks: Vec<BreakWindow>,
    sub_intervals: Vec<SubInterval>,
}

impl WorkCalendar {
    /// 从配置构建工作日历
    ///
    /// # 返回
    /// - Ok((WorkCalendar, 校验提示))
    /// - Err(ConfigError): 上下班时间倒置,或休息覆盖整个工作日
    pub fn from_config(config: &CalendarConfig) -> ConfigResult<(Self, Vec<ValidationNote>)> {
        if config.work_end <= config.work_start {
            return Err(ConfigError::invalid(
                "calendar.work_end",
                config.work_end,
                "下班时间必须晚于上班时间",
            ));
        }

        let mut notes = Vec::new();
        let breaks = Self::normalize_breaks(config, &mut notes);

        // 切分子时段
        let mut sub_intervals = Vec::new();
        let mut cursor = config.work_start;
        for b in &breaks {
            if b.start > cursor {
                sub_intervals.push(SubInterval {
                    start: cursor,
                    end: b.start,
                });
            }
            cursor = cursor.max(b.end);
        }
        if config.work_end > cursor {
            sub_intervals.push(SubInterval {
                start: cursor,
                end: config.work_end,
            });
        }

        if sub_intervals.is_empty() {
            return Err(ConfigError::EmptyCalendar(format!(
                "休息时段覆盖了整个工作时间 {}-{}",
                config.work_start.format("%H:%M"),
                config.work_end.format("%H:%M")
            )));
        }

        debug!(
            sub_interval_count = sub_intervals.len(),
            break_count = breaks.len(),
            "工作日历构建完成"
        );

        Ok((
            Self {
                work_start: config.work_start,
                work_end: config.work_end,
                breaks,
                sub_intervals,
            },
            notes,
        ))
    }

    fn normalize_breaks(config: &CalendarConfig, notes: &mut Vec<ValidationNote>) -> Vec<BreakWindow> {
        let mut valid = Vec::new();

        for b in &config.breaks {
            let subject = format!("break {}-{}", b.start.format("%H:%M"), b.end.format("%H:%M"));

            if b.end <= b.start {
                notes.push(ValidationNote::new(subject, "休息结束时间不晚于开始时间,已忽略"));
                continue;
            }

            let start = b.start.max(config.work_start);
            let end = b.end.min(config.work_end);
            if end <= start {
                notes.push(ValidationNote::new(subject, "休息时段不在工作时间内,已忽略"));
                continue;
            }
            if start != b.start || end != b.end {
                notes.push(ValidationNote::new(
                    subject,
                    format!(
                        "休息时段超出工作时间,已裁剪为 {}-{}",
                        start.format("%H:%M"),
                        end.format("%H:%M")
                    ),
                ));
            }
            valid.push(BreakWindow::new(start, end));
        }

        valid.sort_by_key(|b| (b.start, b.end));

        // 合并重叠/相接的休息时段
        let mut merged: Vec<BreakWindow> = Vec::with_capacity(valid.len());
        for b in valid {
            match merged.last_mut() {
                Some(last) if b.start <= last.end => {
                    last.end = last.end.max(b.end);
                }
                _ => merged.push(b),
            }
        }
        merged
    }

    // ==========================================
    // 查询方法
    // ==========================================

    pub fn work_start(&self) -> NaiveTime {
        self.work_start
    }

    pub fn work_end(&self) -> NaiveTime {
        self.work_end
    }

    /// 规范化后的休息时段
    pub fn breaks(&self) -> &[BreakWindow] {
        &self.breaks
    }

    pub fn sub_intervals(&self) -> &[SubInterval] {
        &self.sub_intervals
    }

    /// 最长子时段（单个工序的工时上限）
    pub fn longest_sub_interval(&self) -> Duration {
        self.sub_intervals
            .iter()
            .map(SubInterval::span)
            .max()
            .unwrap_or_else(Duration::zero)
    }

    /// 每日净工作工时（扣除休息）
    pub fn working_hours_per_day(&self) -> f64 {
        self.sub_intervals
            .iter()
            .map(|si| duration_to_hours(si.span()))
            .sum()
    }

    /// 某天的上班时刻
    pub fn day_start(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.work_start)
    }

    /// 判断时刻是否处于工作子时段内
    pub fn is_working_moment(&self, t: NaiveDateTime) -> bool {
        self.sub_intervals.iter().any(|si| si.contains(t.time()))
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 返回 t 当时或之后最近的可工作时刻
    ///
    /// - 位于子时段内: 原样返回
    /// - 位于休息/上班前: 推到下一个子时段开始
    /// - 下班后: 推到次日第一个子时段开始
    pub fn next_working_moment(&self, t: NaiveDateTime) -> Option<NaiveDateTime> {
        let date = t.date();
        let time = t.time();

        for si in &self.sub_intervals {
            if time < si.end {
                return Some(date.and_time(time.max(si.start)));
            }
        }

        let first = self.sub_intervals.first()?;
        date.succ_opt().map(|next| next.and_time(first.start))
    }

    /// 返回从 t 开始工作时遇到的第一个边界（休息开始或下班）
    ///
    /// t 不在工作时段内时,先按 next_working_moment 前推
    pub fn next_boundary(&self, t: NaiveDateTime) -> Option<NaiveDateTime> {
        let moment = self.next_working_moment(t)?;
        self.sub_intervals
            .iter()
            .find(|si| si.contains(moment.time()))
            .map(|si| moment.date().and_time(si.end))
    }

    /// 判断 [start, end) 是否完整位于某一子时段内
    pub fn fits_in_sub_interval(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        if end.date() != start.date() || end < start {
            return false;
        }
        self.sub_intervals
            .iter()
            .any(|si| si.contains(start.time()) && end.time() <= si.end)
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day().and_time(t(hour, minute))
    }

    fn create_test_calendar(breaks: Vec<(NaiveTime, NaiveTime)>) -> (WorkCalendar, Vec<ValidationNote>) {
        let config = CalendarConfig {
            work_start: t(9, 0),
            work_end: t(17, 0),
            breaks: breaks
                .into_iter()
                .map(|(s, e)| BreakWindow::new(s, e))
                .collect(),
        };
        WorkCalendar::from_config(&config).unwrap()
    }

    #[test]
    fn test_default_lunch_break_splits_day() {
        let (calendar, notes) = create_test_calendar(vec![(t(13, 0), t(14, 0))]);
        assert!(notes.is_empty());
        assert_eq!(
            calendar.sub_intervals(),
            &[
                SubInterval { start: t(9, 0), end: t(13, 0) },
                SubInterval { start: t(14, 0), end: t(17, 0) },
            ]
        );
        assert_eq!(calendar.working_hours_per_day(), 7.0);
        assert_eq!(calendar.longest_sub_interval(), Duration::hours(4));
    }

    #[test]
    fn test_next_working_moment() {
        let (calendar, _) = create_test_calendar(vec![(t(13, 0), t(14, 0))]);

        // 上班前
        assert_eq!(calendar.next_working_moment(at(7, 30)), Some(at(9, 0)));
        // 工作中
        assert_eq!(calendar.next_working_moment(at(10, 15)), Some(at(10, 15)));
        // 休息开始时刻属于休息
        assert_eq!(calendar.next_working_moment(at(13, 0)), Some(at(14, 0)));
        assert_eq!(calendar.next_working_moment(at(13, 40)), Some(at(14, 0)));
        // 下班后 → 次日
        let next_day = day().succ_opt().unwrap().and_time(t(9, 0));
        assert_eq!(calendar.next_working_moment(at(17, 0)), Some(next_day));
        assert_eq!(calendar.next_working_moment(at(22, 0)), Some(next_day));
    }

    #[test]
    fn test_next_boundary() {
        let (calendar, _) = create_test_calendar(vec![(t(13, 0), t(14, 0))]);
        assert_eq!(calendar.next_boundary(at(9, 0)), Some(at(13, 0)));
        assert_eq!(calendar.next_boundary(at(12, 59)), Some(at(13, 0)));
        assert_eq!(calendar.next_boundary(at(13, 30)), Some(at(17, 0)));
        assert_eq!(calendar.next_boundary(at(16, 0)), Some(at(17, 0)));
    }

    #[test]
    fn test_invalid_and_out_of_range_breaks_are_noted() {
        let (calendar, notes) = create_test_calendar(vec![
            (t(12, 0), t(11, 0)), // 倒置
            (t(18, 0), t(19, 0)), // 下班后
            (t(8, 0), t(9, 30)),  // 跨上班时间 → 裁剪
        ]);
        assert_eq!(notes.len(), 3);
        assert_eq!(calendar.breaks(), &[BreakWindow::new(t(9, 0), t(9, 30))]);
        assert_eq!(calendar.next_working_moment(at(9, 0)), Some(at(9, 30)));
    }

    #[test]
    fn test_overlapping_breaks_are_merged() {
        let (calendar, notes) = create_test_calendar(vec![
            (t(12, 30), t(13, 30)),
            (t(13, 0), t(14, 0)),
            (t(14, 0), t(14, 15)),
        ]);
        assert!(notes.is_empty());
        assert_eq!(calendar.breaks(), &[BreakWindow::new(t(12, 30), t(14, 15))]);
        assert_eq!(calendar.sub_intervals().len(), 2);
    }

    #[test]
    fn test_break_covering_whole_day_is_config_error() {
        let config = CalendarConfig {
            work_start: t(9, 0),
            work_end: t(17, 0),
            breaks: vec![BreakWindow::new(t(8, 0), t(18, 0))],
        };
        assert!(matches!(
            WorkCalendar::from_config(&config),
            Err(ConfigError::EmptyCalendar(_))
        ));
    }

    #[test]
    fn test_fits_in_sub_interval() {
        let (calendar, _) = create_test_calendar(vec![(t(13, 0), t(14, 0))]);
        assert!(calendar.fits_in_sub_interval(at(9, 0), at(13, 0)));
        assert!(!calendar.fits_in_sub_interval(at(12, 0), at(14, 30)));
        assert!(calendar.fits_in_sub_interval(at(14, 0), at(17, 0)));
        assert!(!calendar.fits_in_sub_interval(at(16, 0), at(17, 30)));
    }

    #[test]
    fn test_hours_duration_conversion() {
        assert_eq!(hours_to_duration(1.5), Duration::minutes(90));
        assert_eq!(duration_to_hours(Duration::minutes(45)), 0.75);
    }
}
