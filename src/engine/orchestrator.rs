// ==========================================
// 车间排产引擎 - 引擎编排器
// ==========================================
// 用途: 协调各组件的执行顺序,对外提供单一纯函数式排产入口
// 流程: 任务抽取 → 排序合批 → (逐任务) 物料门控 / 通道分配 / 日历对齐 → 排产表组装
// 红线: 同步纯计算,无 I/O;物料与通道状态均为本次调用私有副本
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::PlannerConfigReader;
use crate::domain::schedule::{CapacitySummary, PlanReport};
use crate::domain::snapshot::PlanningSnapshot;
use crate::engine::{
    Allocator, MaterialGate, ScheduleAssembler, StaffLanePool, TaskBatcher, TaskExtractor,
    WorkCalendar,
};
use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// PlanningOrchestrator - 引擎编排器
// ==========================================
pub struct PlanningOrchestrator<C>
where
    C: PlannerConfigReader,
{
    config: Arc<C>,
    extractor: TaskExtractor,
}

impl<C> PlanningOrchestrator<C>
where
    C: PlannerConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            extractor: TaskExtractor::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 执行一次完整排产
    ///
    /// # 参数
    /// - snapshot: 本次排产的输入快照（只读）
    ///
    /// # 返回
    /// - Ok(PlanReport): 排产报告（含未排入记录与校验提示）
    /// - Err(ConfigError): 配置无效
    #[instrument(skip(self, snapshot), fields(
        today = %snapshot.today,
        jobs = snapshot.jobs.len(),
        materials = snapshot.materials.len()
    ))]
    pub fn plan(&self, snapshot: &PlanningSnapshot) -> ConfigResult<PlanReport> {
        let config = self.config.to_planner_config();
        config.validate()?;
        let today = snapshot.today;

        info!(
            staff_count = config.staff_count,
            daily_hours = config.daily_hours,
            horizon_days = config.horizon_days,
            "开始执行排产流程"
        );

        // ==========================================
        // 步骤1: 工作日历
        // ==========================================
        let (calendar, mut notes) = WorkCalendar::from_config(&config.calendar)?;

        // ==========================================
        // 步骤2: 任务抽取
        // ==========================================
        debug!("步骤2: 执行任务抽取");
        let extraction = self.extractor.extract(&snapshot.jobs, today);
        notes.extend(extraction.notes);

        info!(
            task_count = extraction.tasks.len(),
            note_count = notes.len(),
            "任务抽取完成"
        );

        // ==========================================
        // 步骤3: 交期排序 + 合批
        // ==========================================
        debug!("步骤3: 执行交期排序与合批");
        let batches = TaskBatcher::new(config.batch_window_days).build_batches(extraction.tasks);

        info!(batch_count = batches.len(), "交期排序与合批完成");

        // ==========================================
        // 步骤4: 逐批分配
        // ==========================================
        debug!("步骤4: 执行时间/资源分配");
        let gate = MaterialGate::from_stock(&snapshot.materials, config.material_units_per_process);
        let pool = StaffLanePool::new(
            config.staff_count,
            config.daily_hours,
            calendar.work_start(),
            today,
        );
        let horizon_end = today + Duration::days(i64::from(config.horizon_days) - 1);
        let mut allocator = Allocator::new(&calendar, gate, pool, horizon_end);

        let mut records = Vec::new();
        for batch in &batches {
            records.extend(allocator.place_batch(batch));
        }

        let (pool, _gate) = allocator.into_parts();
        let summary = CapacitySummary::new(
            pool.total_used_hours(),
            config.staff_count as f64 * config.daily_hours * f64::from(config.horizon_days),
        );

        // ==========================================
        // 步骤5: 排产表组装
        // ==========================================
        debug!("步骤5: 执行排产表组装");
        let assembler = ScheduleAssembler::new(today, config.near_due_days, config.staff_names.clone());
        let report = assembler.assemble(records, summary, notes);

        info!(
            scheduled = report.scheduled_count(),
            unscheduled = report.unscheduled_count(),
            used_hours = report.summary.total_used_hours,
            utilization = report.summary.utilization,
            "排产流程完成"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::domain::job::{Job, Process};
    use crate::domain::types::TaskStatus;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn create_test_orchestrator(config: PlannerConfig) -> PlanningOrchestrator<PlannerConfig> {
        PlanningOrchestrator::new(Arc::new(config))
    }

    #[test]
    fn test_plan_empty_snapshot() {
        let orchestrator = create_test_orchestrator(PlannerConfig::default());
        let report = orchestrator.plan(&PlanningSnapshot::new(today())).unwrap();

        assert!(report.rows.is_empty());
        assert!(report.unscheduled.is_empty());
        assert_eq!(report.summary.total_capacity_hours, 16.0);
        assert_eq!(report.summary.utilization, 0.0);
    }

    #[test]
    fn test_plan_rejects_invalid_config() {
        let orchestrator = create_test_orchestrator(PlannerConfig::default().with_staff(0, 8.0));
        assert!(orchestrator.plan(&PlanningSnapshot::new(today())).is_err());
    }

    #[test]
    fn test_plan_reports_summary() {
        let orchestrator = create_test_orchestrator(PlannerConfig::default());
        let snapshot = PlanningSnapshot::new(today()).with_job(Job {
            job_id: "J1".to_string(),
            name: "Brochure".to_string(),
            due_date: today(),
            quantity: 100,
            processes: vec![Process::new("Cutting", 3.0, 2), Process::new("Folding", 1.0, 1)],
        });

        let report = orchestrator.plan(&snapshot).unwrap();

        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.iter().all(|r| r.status == TaskStatus::Scheduled));
        assert_eq!(report.summary.total_used_hours, 7.0);
        assert!((report.summary.utilization - 7.0 / 16.0).abs() < 1e-9);
    }
}
