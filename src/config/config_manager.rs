// ==========================================
// 车间排产引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、单项覆写、快照
// 存储: JSON 配置文件 (缺省项取默认值)
// ==========================================

use crate::config::config_reader::PlannerConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::planner_config::{config_keys, CalendarConfig, PlannerConfig};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PlannerConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 从配置结构体创建（会先校验）
    pub fn new(config: PlannerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: PlannerConfig = serde_json::from_str(raw)?;
        Self::new(config)
    }

    /// 从 JSON 文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径
    ///
    /// # 返回
    /// - Ok(ConfigManager): 加载并校验通过
    /// - Err(ConfigError): 文件读取/解析/校验失败
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let mut manager = Self::from_json_str(&raw)?;
        manager.source = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            staff_count = manager.config.staff_count,
            horizon_days = manager.config.horizon_days,
            "配置加载完成"
        );
        Ok(manager)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 覆写单个顶层配置项
    ///
    /// 覆写后整体重新校验,校验失败时保持原配置不变
    ///
    /// # 参数
    /// - key: 顶层配置键 (见 config_keys::ALL)
    /// - value: 新值 (JSON)
    pub fn update_config(&mut self, key: &str, value: Value) -> ConfigResult<()> {
        if !config_keys::ALL.contains(&key) {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = serde_json::to_value(&self.config)?;
        if let Value::Object(map) = &mut current {
            map.insert(key.to_string(), value);
        }

        let updated: PlannerConfig = serde_json::from_value(current)?;
        updated.validate()?;

        debug!(key, "配置项已覆写");
        self.config = updated;
        Ok(())
    }

    /// 获取当前配置快照（JSON）
    ///
    /// # 用途
    /// - 与排产报告一起留档,保证结果可复现
    pub fn config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.config)?)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            config: PlannerConfig::default(),
            source: None,
        }
    }
}

impl PlannerConfigReader for ConfigManager {
    fn staff_count(&self) -> usize {
        self.config.staff_count
    }

    fn daily_hours(&self) -> f64 {
        self.config.daily_hours
    }

    fn staff_names(&self) -> Vec<String> {
        self.config.staff_names.clone()
    }

    fn calendar(&self) -> CalendarConfig {
        self.config.calendar.clone()
    }

    fn horizon_days(&self) -> u32 {
        self.config.horizon_days
    }

    fn batch_window_days(&self) -> i64 {
        self.config.batch_window_days
    }

    fn near_due_days(&self) -> i64 {
        self.config.near_due_days
    }

    fn material_units_per_process(&self) -> f64 {
        self.config.material_units_per_process
    }

    fn to_planner_config(&self) -> PlannerConfig {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_config_applies_valid_value() {
        let mut manager = ConfigManager::default();
        manager
            .update_config(config_keys::STAFF_COUNT, json!(4))
            .unwrap();
        assert_eq!(manager.staff_count(), 4);
    }

    #[test]
    fn test_update_config_rejects_invalid_value_and_keeps_old() {
        let mut manager = ConfigManager::default();
        let result = manager.update_config(config_keys::DAILY_HOURS, json!(-1.0));
        assert!(result.is_err());
        assert_eq!(manager.daily_hours(), 8.0);
    }

    #[test]
    fn test_update_config_rejects_unknown_key() {
        let mut manager = ConfigManager::default();
        assert!(matches!(
            manager.update_config("shift_pattern", json!("A")),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_config_snapshot_round_trips() {
        let manager = ConfigManager::default();
        let snapshot = manager.config_snapshot().unwrap();
        let restored = ConfigManager::from_json_str(&snapshot).unwrap();
        assert_eq!(restored.config(), manager.config());
    }
}
