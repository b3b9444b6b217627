//! 错误处理模块
//!
//! 定义SSH流日志器中使用的所有错误类型。

use thiserror::Error;

/// 日志器的结果类型
pub type Result<T> = std::result::Result<T, EmitError>;

/// 日志器错误类型
#[derive(Error, Debug)]
pub enum EmitError {
    /// 流锁获取失败（锁已中毒）
    #[error("Flow lock poisoned: flow {flow_id}, mode {mode}")]
    LockPoisoned {
        /// 流ID
        flow_id: u64,
        /// 锁模式（read / write）
        mode: &'static str,
    },

    /// 横幅格式错误
    #[error("Invalid SSH banner: {banner}")]
    InvalidBanner {
        /// 原始横幅
        banner: String,
    },

    /// 横幅已设置（横幅一旦设置不可修改）
    #[error("SSH {side} banner already set")]
    BannerAlreadySet {
        /// 哪一端（client / server）
        side: &'static str,
    },

    /// 输出端拒绝事件
    #[error("Sink {sink} rejected event: {reason}")]
    SinkRejected {
        /// 输出端名称
        sink: String,
        /// 拒绝原因
        reason: String,
    },

    /// 配置错误
    #[error("Configuration error: {message}")]
    ConfigError {
        /// 错误消息
        message: String,
    },

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O错误
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// 内部错误
    #[error("Internal error: {message}")]
    InternalError {
        /// 错误消息
        message: String,
    },
}

impl EmitError {
    /// 创建锁中毒错误
    pub fn lock_poisoned(flow_id: u64, mode: &'static str) -> Self {
        Self::LockPoisoned { flow_id, mode }
    }

    /// 创建横幅格式错误
    pub fn invalid_banner<S: Into<String>>(banner: S) -> Self {
        Self::InvalidBanner {
            banner: banner.into(),
        }
    }

    /// 创建输出端拒绝错误
    pub fn sink_rejected<S1, S2>(sink: S1, reason: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::SinkRejected {
            sink: sink.into(),
            reason: reason.into(),
        }
    }

    /// 创建配置错误
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// 创建内部错误
    pub fn internal_error<S: Into<String>>(message: S) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// 检查是否为可恢复错误
    ///
    /// 可恢复错误不会修改流状态，后续数据包会重新走一遍判定流程。
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SinkRejected { .. } | Self::IoError(_) | Self::Serialization(_)
        )
    }

    /// 检查是否为配置相关错误
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// 获取错误代码
    pub fn error_code(&self) -> u32 {
        match self {
            Self::LockPoisoned { .. } => 2001,
            Self::InvalidBanner { .. } => 2002,
            Self::BannerAlreadySet { .. } => 2003,
            Self::SinkRejected { .. } => 2004,
            Self::ConfigError { .. } => 2005,
            Self::Serialization(_) => 2006,
            Self::IoError(_) => 2007,
            Self::InternalError { .. } => 2999,
        }
    }
}

/// 从anyhow::Error转换
impl From<anyhow::Error> for EmitError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal_error(err.to_string())
    }
}
