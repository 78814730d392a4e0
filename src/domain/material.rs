// ==========================================
// 车间排产引擎 - 物料库存领域模型
// ==========================================
// 职责: 定义库存条目与物料键
// 来源: 外部物料存储 (category, item, size, quantity)
// ==========================================

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ==========================================
// MaterialKey - 物料键
// ==========================================
// 精确匹配,不做大小写归一化
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MaterialKey {
    pub category: String,
    pub item: String,
    pub size: String,
}

impl MaterialKey {
    pub fn new(category: &str, item: &str, size: &str) -> Self {
        Self {
            category: category.to_string(),
            item: item.to_string(),
            size: size.to_string(),
        }
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.item, self.size)
    }
}

// ==========================================
// MaterialStock - 库存条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialStock {
    pub category: String,
    pub item: String,
    #[serde(deserialize_with = "deserialize_size")]
    pub size: String,
    pub quantity: f64, // 剩余数量 (>= 0)
}

impl MaterialStock {
    pub fn new(category: &str, item: &str, size: &str, quantity: f64) -> Self {
        Self {
            category: category.to_string(),
            item: item.to_string(),
            size: size.to_string(),
            quantity,
        }
    }

    pub fn key(&self) -> MaterialKey {
        MaterialKey::new(&self.category, &self.item, &self.size)
    }
}

// ==========================================
// 规格字段反序列化
// ==========================================
// 外部存储中规格可能是数字也可能是字符串,统一按字符串比较
#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    Text(String),
    Int(i64),
    Float(f64),
}

pub(crate) fn deserialize_size<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match SizeRepr::deserialize(deserializer)? {
        SizeRepr::Text(s) => s.trim().to_string(),
        SizeRepr::Int(n) => n.to_string(),
        SizeRepr::Float(x) => x.to_string(),
    })
}
