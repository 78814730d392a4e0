// ==========================================
// 车间排产引擎 - 物料门控
// ==========================================
// 职责: 持有库存私有快照,回答可用性查询,排入时扣减
// 红线: 只操作快照,不触碰真实库存;数量永不为负
// ==========================================
// 消耗策略:
// - 工序声明了 material.quantity 时按声明量扣减
// - 否则按配置 material_units_per_process 扣减 (默认 1)
// - 可用性判定为 "剩余数量 > 0",扣减后饱和到 0,为 0 时移除条目
// ==========================================

use crate::domain::job::MaterialRef;
use crate::domain::material::{MaterialKey, MaterialStock};
use std::collections::BTreeMap;
use tracing::debug;

// ==========================================
// MaterialGate - 物料门控
// ==========================================
#[derive(Debug, Clone)]
pub struct MaterialGate {
    stock: BTreeMap<MaterialKey, f64>,
    default_units: f64,
}

impl MaterialGate {
    /// 从库存条目构建快照
    ///
    /// - 同键条目数量合并
    /// - 数量 <= 0 或非有限值的条目不进入快照
    pub fn from_stock(entries: &[MaterialStock], default_units: f64) -> Self {
        let mut stock: BTreeMap<MaterialKey, f64> = BTreeMap::new();
        for entry in entries {
            if !entry.quantity.is_finite() || entry.quantity <= 0.0 {
                continue;
            }
            *stock.entry(entry.key()).or_insert(0.0) += entry.quantity;
        }

        debug!(entries = stock.len(), "物料快照构建完成");

        Self {
            stock,
            default_units,
        }
    }

    /// 查询可用库存
    ///
    /// # 返回
    /// - Some(剩余数量): 存在数量 > 0 的条目
    /// - None: 无匹配或已耗尽
    pub fn find_available(&self, key: &MaterialKey) -> Option<f64> {
        self.stock.get(key).copied().filter(|qty| *qty > 0.0)
    }

    /// 单次排入的消耗量
    pub fn units_for(&self, material: &MaterialRef) -> f64 {
        material
            .quantity
            .filter(|q| q.is_finite() && *q >= 0.0)
            .unwrap_or(self.default_units)
    }

    /// 扣减库存
    ///
    /// # 返回
    /// 扣减后的剩余数量（为 0 时条目已移除）
    pub fn consume(&mut self, key: &MaterialKey, amount: f64) -> f64 {
        let remaining = match self.stock.get_mut(key) {
            Some(qty) => {
                *qty = (*qty - amount).max(0.0);
                *qty
            }
            None => return 0.0,
        };

        if remaining <= 0.0 {
            self.stock.remove(key);
            debug!(material = %key, "物料已耗尽");
        }
        remaining
    }

    /// 当前快照中剩余数量（不存在时为 0）
    pub fn remaining(&self, key: &MaterialKey) -> f64 {
        self.stock.get(key).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}
