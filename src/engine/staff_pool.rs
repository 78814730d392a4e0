// ==========================================
// 车间排产引擎 - 人员通道池
// ==========================================
// 职责: N 条相互独立的人员时间轴,跟踪空闲时刻与每日已用工时
// 红线: 单通道单日工时 <= daily_hours;
//       排入结束时刻 <= 当日 work_start + daily_hours
// ==========================================
// 通道可互换,不区分技能;人员姓名仅用于展示
// ==========================================

use crate::engine::work_calendar::{duration_to_hours, hours_to_duration};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

// 浮点工时累加容差
const HOURS_EPSILON: f64 = 1e-9;

// ==========================================
// StaffLane - 人员通道
// ==========================================
#[derive(Debug, Clone)]
pub struct StaffLane {
    pub index: usize,
    pub next_free: NaiveDateTime,
    used_hours: BTreeMap<NaiveDate, f64>,
}

impl StaffLane {
    fn new(index: usize, next_free: NaiveDateTime) -> Self {
        Self {
            index,
            next_free,
            used_hours: BTreeMap::new(),
        }
    }

    /// 某日已用工时
    pub fn used_hours_on(&self, day: NaiveDate) -> f64 {
        self.used_hours.get(&day).copied().unwrap_or(0.0)
    }

    /// 累计已用工时
    pub fn total_used_hours(&self) -> f64 {
        self.used_hours.values().sum()
    }
}

// ==========================================
// LaneGroup - 候选通道组
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneGroup {
    pub lanes: Vec<usize>,          // 通道序号 (升序)
    pub ready_at: NaiveDateTime,    // 组内全部通道均空闲的最早时刻
}

// ==========================================
// StaffLanePool - 人员通道池
// ==========================================
#[derive(Debug, Clone)]
pub struct StaffLanePool {
    lanes: Vec<StaffLane>,
    daily_hours: f64,
    work_start: NaiveTime,
}

impl StaffLanePool {
    /// 创建通道池,所有通道从 first_day 的上班时刻开始空闲
    pub fn new(staff_count: usize, daily_hours: f64, work_start: NaiveTime, first_day: NaiveDate) -> Self {
        let start = first_day.and_time(work_start);
        Self {
            lanes: (0..staff_count).map(|i| StaffLane::new(i, start)).collect(),
            daily_hours,
            work_start,
        }
    }

    pub fn staff_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn daily_hours(&self) -> f64 {
        self.daily_hours
    }

    pub fn lanes(&self) -> &[StaffLane] {
        &self.lanes
    }

    /// 选出最早可同时开工的 k 条通道
    ///
    /// 按 next_free 升序选取,平局按通道序号
    ///
    /// # 返回
    /// - Some(LaneGroup)
    /// - None: k 为 0 或超过通道总数
    pub fn earliest_group_start(&self, k: usize) -> Option<LaneGroup> {
        if k == 0 || k > self.lanes.len() {
            return None;
        }

        let mut order: Vec<&StaffLane> = self.lanes.iter().collect();
        order.sort_by_key(|lane| (lane.next_free, lane.index));

        let selected = &order[..k];
        let ready_at = selected.iter().map(|lane| lane.next_free).max()?;
        let mut lanes: Vec<usize> = selected.iter().map(|lane| lane.index).collect();
        lanes.sort_unstable();

        Some(LaneGroup { lanes, ready_at })
    }

    /// 某日通道产能截止时刻
    pub fn capacity_end(&self, day: NaiveDate) -> NaiveDateTime {
        day.and_time(self.work_start) + hours_to_duration(self.daily_hours)
    }

    /// 判断通道组能否承接 [start, end)
    ///
    /// 条件（组内每条通道）:
    /// 1) end <= 当日产能截止时刻
    /// 2) 当日已用工时 + 本次工时 <= daily_hours
    /// 3) 通道在 start 前已空闲
    pub fn can_fit(&self, group: &LaneGroup, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        let day = start.date();
        if end.date() != day || end > self.capacity_end(day) {
            return false;
        }

        let hours = duration_to_hours(end - start);
        group.lanes.iter().all(|&i| match self.lanes.get(i) {
            Some(lane) => {
                lane.next_free <= start
                    && lane.used_hours_on(day) + hours <= self.daily_hours + HOURS_EPSILON
            }
            None => false,
        })
    }

    /// 占用通道组
    pub fn assign(&mut self, group: &LaneGroup, start: NaiveDateTime, end: NaiveDateTime) {
        let day = start.date();
        let hours = duration_to_hours(end - start);
        for &i in &group.lanes {
            if let Some(lane) = self.lanes.get_mut(i) {
                lane.next_free = end;
                *lane.used_hours.entry(day).or_insert(0.0) += hours;
            }
        }
    }

    /// 全部通道累计已用工时
    pub fn total_used_hours(&self) -> f64 {
        self.lanes.iter().map(StaffLane::total_used_hours).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day().and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }

    fn create_test_pool(staff_count: usize) -> StaffLanePool {
        StaffLanePool::new(
            staff_count,
            8.0,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            day(),
        )
    }

    #[test]
    fn test_group_selection_ties_broken_by_index() {
        let pool = create_test_pool(3);
        let group = pool.earliest_group_start(2).unwrap();
        assert_eq!(group.lanes, vec![0, 1]);
        assert_eq!(group.ready_at, at(9, 0));
    }

    #[test]
    fn test_group_selection_prefers_earliest_free() {
        let mut pool = create_test_pool(3);
        let first = pool.earliest_group_start(1).unwrap();
        pool.assign(&first, at(9, 0), at(12, 0));

        let group = pool.earliest_group_start(2).unwrap();
        assert_eq!(group.lanes, vec![1, 2]);
        assert_eq!(group.ready_at, at(9, 0));

        let all = pool.earliest_group_start(3).unwrap();
        assert_eq!(all.ready_at, at(12, 0));
    }

    #[test]
    fn test_group_larger_than_pool_is_none() {
        let pool = create_test_pool(2);
        assert!(pool.earliest_group_start(3).is_none());
        assert!(pool.earliest_group_start(0).is_none());
    }

    #[test]
    fn test_capacity_end_is_work_start_plus_daily_hours() {
        let pool = create_test_pool(1);
        assert_eq!(pool.capacity_end(day()), at(17, 0));
    }

    #[test]
    fn test_can_fit_rejects_past_capacity_end() {
        let pool = create_test_pool(1);
        let group = pool.earliest_group_start(1).unwrap();
        assert!(pool.can_fit(&group, at(14, 0), at(17, 0)));
        assert!(!pool.can_fit(&group, at(15, 0), at(18, 0)));
    }

    #[test]
    fn test_assign_tracks_used_hours_per_day() {
        let mut pool = create_test_pool(2);
        let group = pool.earliest_group_start(2).unwrap();
        pool.assign(&group, at(9, 0), at(11, 30));

        for lane in pool.lanes() {
            assert_eq!(lane.next_free, at(11, 30));
            assert_eq!(lane.used_hours_on(day()), 2.5);
        }
        assert_eq!(pool.total_used_hours(), 5.0);
    }

    #[test]
    fn test_can_fit_rejects_lane_not_yet_free() {
        let mut pool = create_test_pool(1);
        let group = pool.earliest_group_start(1).unwrap();
        pool.assign(&group, at(9, 0), at(12, 0));
        assert!(!pool.can_fit(&group, at(11, 0), at(12, 0)));
        assert!(pool.can_fit(&group, at(12, 0), at(13, 0)));
    }
}
