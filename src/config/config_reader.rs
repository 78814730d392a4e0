// ==========================================
// 车间排产引擎 - 配置读取 Trait
// ==========================================
// 职责: 定义引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::planner_config::{CalendarConfig, PlannerConfig};

// ==========================================
// PlannerConfigReader Trait
// ==========================================
// 实现者: PlannerConfig（测试直接传结构体）、ConfigManager（文件加载）
pub trait PlannerConfigReader: Send + Sync {
    // ===== 人员 =====

    /// 人员通道数
    fn staff_count(&self) -> usize;

    /// 单人日工时
    fn daily_hours(&self) -> f64;

    /// 通道展示名称（可为空）
    fn staff_names(&self) -> Vec<String>;

    // ===== 日历 =====

    fn calendar(&self) -> CalendarConfig;

    /// 排产窗口天数（含 today）
    fn horizon_days(&self) -> u32;

    // ===== 合批/交期/物料 =====

    /// 合批交期邻近窗口（天）
    ///
    /// # 默认值
    /// - 2
    fn batch_window_days(&self) -> i64;

    /// 临期阈值（天）: due_date <= today + N 视为 NEAR DUE
    ///
    /// # 默认值
    /// - 1
    fn near_due_days(&self) -> i64;

    /// 单工序默认物料消耗量
    fn material_units_per_process(&self) -> f64;

    /// 汇总为 PlannerConfig
    fn to_planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            staff_count: self.staff_count(),
            daily_hours: self.daily_hours(),
            calendar: self.calendar(),
            batch_window_days: self.batch_window_days(),
            near_due_days: self.near_due_days(),
            material_units_per_process: self.material_units_per_process(),
            horizon_days: self.horizon_days(),
            staff_names: self.staff_names(),
        }
    }
}

impl PlannerConfigReader for PlannerConfig {
    fn staff_count(&self) -> usize {
        self.staff_count
    }

    fn daily_hours(&self) -> f64 {
        self.daily_hours
    }

    fn staff_names(&self) -> Vec<String> {
        self.staff_names.clone()
    }

    fn calendar(&self) -> CalendarConfig {
        self.calendar.clone()
    }

    fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    fn batch_window_days(&self) -> i64 {
        self.batch_window_days
    }

    fn near_due_days(&self) -> i64 {
        self.near_due_days
    }

    fn material_units_per_process(&self) -> f64 {
        self.material_units_per_process
    }

    fn to_planner_config(&self) -> PlannerConfig {
        self.clone()
    }
}
