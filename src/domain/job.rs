// ==========================================
// 车间排产引擎 - 订单与工序领域模型
// ==========================================
// 职责: 定义 Job / Process / MaterialRef
// 来源: 外部订单存储提供的只读快照
// 红线: 引擎不修改 Job/Process,只输出排产记录
// ==========================================

use crate::domain::material::{deserialize_size, MaterialKey};
use crate::domain::types::ProcessState;
use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

// ==========================================
// Job - 订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,               // 订单ID (稳定标识)
    #[serde(default)]
    pub name: String,                 // 展示名称 (为空时回落到 job_id)
    pub due_date: NaiveDate,          // 交期
    #[serde(default = "default_quantity")]
    pub quantity: u32,                // 数量
    #[serde(default)]
    pub processes: Vec<Process>,      // 工序列表 (有序)
}

fn default_quantity() -> u32 {
    1
}

impl Job {
    /// 展示名称
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.job_id
        } else {
            &self.name
        }
    }
}

// ==========================================
// Process - 工序
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,                    // 工序名称 (归一化后用于合批)
    #[serde(default = "missing_hours", deserialize_with = "deserialize_hours")]
    pub hours: f64,                      // 所需工时 (无法解析时为 NaN)
    #[serde(default = "default_workers", deserialize_with = "deserialize_workers")]
    pub workers: u32,                    // 所需人数 (无法解析时为 0)
    #[serde(default)]
    pub machine: Option<String>,         // 机台 (仅展示)
    #[serde(default)]
    pub material: Option<MaterialRef>,   // 物料引用
    #[serde(default)]
    pub state: ProcessState,             // 生命周期状态
}

fn default_workers() -> u32 {
    1
}

fn missing_hours() -> f64 {
    f64::NAN
}

// ==========================================
// 工时/人数宽松反序列化
// ==========================================
// 外部存储中数值可能是字符串或缺失;单条工序解析失败不应拖垮整个快照。
// 无法解析的工时记为 NaN,无法解析的人数记为 0,由任务抽取跳过并记录提示。
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn deserialize_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberRepr::deserialize(deserializer)? {
        NumberRepr::Int(n) => n as f64,
        NumberRepr::Float(x) => x,
        NumberRepr::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        NumberRepr::Other(_) => f64::NAN,
    })
}

fn deserialize_workers<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberRepr::deserialize(deserializer)? {
        NumberRepr::Int(n) => u32::try_from(n).unwrap_or(0),
        NumberRepr::Float(x) if x.fract() == 0.0 && x >= 0.0 && x <= f64::from(u32::MAX) => x as u32,
        NumberRepr::Float(_) => 0,
        NumberRepr::Text(s) => s.trim().parse::<u32>().unwrap_or(0),
        NumberRepr::Other(_) => 0,
    })
}

impl Process {
    /// 创建待排工序
    pub fn new(name: impl Into<String>, hours: f64, workers: u32) -> Self {
        Self {
            name: name.into(),
            hours,
            workers,
            machine: None,
            material: None,
            state: ProcessState::Pending,
        }
    }

    pub fn with_machine(mut self, machine: impl Into<String>) -> Self {
        self.machine = Some(machine.into());
        self
    }

    pub fn with_material(mut self, material: MaterialRef) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_state(mut self, state: ProcessState) -> Self {
        self.state = state;
        self
    }
}

// ==========================================
// MaterialRef - 物料引用
// ==========================================
// (category, item, size) 三元组 + 可选的单次消耗量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRef {
    pub category: String,
    pub item: String,
    #[serde(deserialize_with = "deserialize_size")]
    pub size: String,
    #[serde(default)]
    pub quantity: Option<f64>, // 单次消耗量; None 时使用配置默认值
}

impl MaterialRef {
    pub fn new(
        category: impl Into<String>,
        item: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            item: item.into(),
            size: size.into(),
            quantity: None,
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// 任一分量为空白时视为未声明物料
    pub fn is_incomplete(&self) -> bool {
        [&self.category, &self.item, &self.size]
            .iter()
            .any(|part| part.trim().is_empty())
    }

    pub fn key(&self) -> MaterialKey {
        MaterialKey::new(&self.category, &self.item, &self.size)
    }
}
