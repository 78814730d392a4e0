// ==========================================
// 车间排产引擎 - 排产配置
// ==========================================
// 职责: 人员/日历/合批/交期/物料/排产窗口配置项及校验
// 红线: 配置由调用方提供,引擎不推算
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const STAFF_COUNT: &str = "staff_count";
    pub const DAILY_HOURS: &str = "daily_hours";
    pub const CALENDAR: &str = "calendar";
    pub const WORK_START: &str = "calendar.work_start";
    pub const WORK_END: &str = "calendar.work_end";
    pub const BATCH_WINDOW_DAYS: &str = "batch_window_days";
    pub const NEAR_DUE_DAYS: &str = "near_due_days";
    pub const MATERIAL_UNITS_PER_PROCESS: &str = "material_units_per_process";
    pub const HORIZON_DAYS: &str = "horizon_days";
    pub const STAFF_NAMES: &str = "staff_names";

    /// 全部顶层配置键
    pub const ALL: &[&str] = &[
        STAFF_COUNT,
        DAILY_HOURS,
        CALENDAR,
        BATCH_WINDOW_DAYS,
        NEAR_DUE_DAYS,
        MATERIAL_UNITS_PER_PROCESS,
        HORIZON_DAYS,
        STAFF_NAMES,
    ];
}

// 单个排产窗口上限,防止误配置导致长时间空转
const MAX_HORIZON_DAYS: u32 = 366;

// 合批窗口 / 临期阈值上限 (天)
const MAX_DAY_WINDOW: i64 = 366;

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

// ==========================================
// 时刻格式 ("09:00" 或 "09:00:00")
// ==========================================
pub(crate) mod time_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|e| serde::de::Error::custom(format!("时刻格式错误 '{}': {}", raw, e)))
    }
}

// ==========================================
// BreakWindow - 休息时段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    #[serde(with = "time_format")]
    pub start: NaiveTime,
    #[serde(with = "time_format")]
    pub end: NaiveTime,
}

impl BreakWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

// ==========================================
// CalendarConfig - 工作日历 (每天相同)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    #[serde(with = "time_format")]
    pub work_start: NaiveTime,
    #[serde(with = "time_format")]
    pub work_end: NaiveTime,
    pub breaks: Vec<BreakWindow>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            work_start: hm(9, 0),
            work_end: hm(17, 0),
            breaks: vec![BreakWindow::new(hm(13, 0), hm(14, 0))],
        }
    }
}

// ==========================================
// PlannerConfig - 排产配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub staff_count: usize,               // 人员通道数
    pub daily_hours: f64,                 // 单人日工时
    pub calendar: CalendarConfig,         // 工作日历
    pub batch_window_days: i64,           // 合批交期邻近窗口 (天)
    pub near_due_days: i64,               // 临期阈值 (天)
    pub material_units_per_process: f64,  // 单工序默认物料消耗
    pub horizon_days: u32,                // 排产窗口天数 (含 today)
    pub staff_names: Vec<String>,         // 通道展示名称 (仅展示)
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            staff_count: 2,
            daily_hours: 8.0,
            calendar: CalendarConfig::default(),
            batch_window_days: 2,
            near_due_days: 1,
            material_units_per_process: 1.0,
            horizon_days: 1,
            staff_names: Vec::new(),
        }
    }
}

impl PlannerConfig {
    pub fn with_staff(mut self, staff_count: usize, daily_hours: f64) -> Self {
        self.staff_count = staff_count;
        self.daily_hours = daily_hours;
        self
    }

    pub fn with_calendar(mut self, calendar: CalendarConfig) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_horizon_days(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    /// 校验配置值
    ///
    /// 休息时段的畸形/越界问题不在此报错,由工作日历裁剪并记录提示
    pub fn validate(&self) -> ConfigResult<()> {
        use config_keys::*;

        if self.staff_count == 0 {
            return Err(ConfigError::invalid(STAFF_COUNT, self.staff_count, "至少需要 1 个人员通道"));
        }
        if !self.daily_hours.is_finite() || self.daily_hours <= 0.0 || self.daily_hours > 24.0 {
            return Err(ConfigError::invalid(DAILY_HOURS, self.daily_hours, "日工时必须在 (0, 24] 范围内"));
        }
        if self.calendar.work_end <= self.calendar.work_start {
            return Err(ConfigError::invalid(
                WORK_END,
                self.calendar.work_end,
                format!("下班时间必须晚于上班时间 {}", self.calendar.work_start),
            ));
        }
        if !(0..=MAX_DAY_WINDOW).contains(&self.batch_window_days) {
            return Err(ConfigError::invalid(
                BATCH_WINDOW_DAYS,
                self.batch_window_days,
                format!("必须在 [0, {}] 范围内", MAX_DAY_WINDOW),
            ));
        }
        if !(0..=MAX_DAY_WINDOW).contains(&self.near_due_days) {
            return Err(ConfigError::invalid(
                NEAR_DUE_DAYS,
                self.near_due_days,
                format!("必须在 [0, {}] 范围内", MAX_DAY_WINDOW),
            ));
        }
        if !self.material_units_per_process.is_finite() || self.material_units_per_process < 0.0 {
            return Err(ConfigError::invalid(
                MATERIAL_UNITS_PER_PROCESS,
                self.material_units_per_process,
                "必须为非负有限数",
            ));
        }
        if self.horizon_days == 0 || self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ConfigError::invalid(
                HORIZON_DAYS,
                self.horizon_days,
                format!("必须在 [1, {}] 范围内", MAX_HORIZON_DAYS),
            ));
        }
        Ok(())
    }
}
