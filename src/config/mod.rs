// ==========================================
// 车间排产引擎 - 配置层
// ==========================================
// 职责: 排产配置加载、校验与读取接口
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod config_reader;
pub mod error;
pub mod planner_config;

// 重导出核心配置类型
pub use config_manager::ConfigManager;
pub use config_reader::PlannerConfigReader;
pub use error::{ConfigError, ConfigResult};
pub use planner_config::{config_keys, BreakWindow, CalendarConfig, PlannerConfig};
