// ==========================================
// 车间排产引擎 - 配置错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 配置值错误 =====
    #[error("配置值无效 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("未知配置项: {0}")]
    UnknownKey(String),

    #[error("工作日历无可用时段: {0}")]
    EmptyCalendar(String),

    // ===== 文件/解析错误 =====
    #[error("配置文件读取失败: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("配置解析失败: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, value: impl ToString, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
