// ==========================================
// 车间排产引擎 - 排产输入快照
// ==========================================
// 职责: 单次排产调用的不可变输入
// 红线: 每次调用独立克隆快照,引擎不持有全局可变状态
// ==========================================

use crate::domain::job::Job;
use crate::domain::material::MaterialStock;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningSnapshot {
    pub today: NaiveDate,                // 排产起始日 (交期判定基准)
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub materials: Vec<MaterialStock>,
}

impl PlanningSnapshot {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            jobs: Vec::new(),
            materials: Vec::new(),
        }
    }

    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    pub fn with_material(mut self, stock: MaterialStock) -> Self {
        self.materials.push(stock);
        self
    }
}
