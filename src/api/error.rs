// ==========================================
// 车间排产引擎 - API层错误类型
// ==========================================
// 职责: 汇总配置/快照/决策回写错误,输出显式原因
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 快照错误
    // ==========================================
    #[error("快照读取失败: {0}")]
    SnapshotReadError(#[from] std::io::Error),

    #[error("快照解析失败: {0}")]
    SnapshotParseError(#[from] serde_json::Error),

    // ==========================================
    // 决策回写错误
    // ==========================================
    #[error("订单不存在: job_id={0}")]
    UnknownJob(String),

    #[error("工序序号越界: job_id={job_id}, process_index={process_index}, process_count={process_count}")]
    ProcessIndexOutOfRange {
        job_id: String,
        process_index: usize,
        process_count: usize,
    },
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
