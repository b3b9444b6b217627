//! 日志模块
//!
//! 封装rat_logger日志库，提供统一的日志开关和级别过滤。
//! 日志器后端由宿主进程初始化，这里只保存本库的过滤配置。

use once_cell::sync::OnceCell;

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// 是否启用日志
    pub enabled: bool,
    /// 日志级别
    pub level: LogLevel,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// 错误
    Error,
    /// 警告
    Warn,
    /// 信息
    Info,
    /// 调试
    Debug,
    /// 跟踪
    Trace,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
        }
    }
}

/// 日志器
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    /// 创建新的日志器
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// 获取配置
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// 检查是否启用了指定级别的日志
    ///
    /// 级别越详细数值越大，配置为 `Info` 时放行 `Error`/`Warn`/`Info`。
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.config.enabled && level <= self.config.level
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

static GLOBAL_LOGGER: OnceCell<Logger> = OnceCell::new();

/// 初始化全局日志器
///
/// 只有第一次调用生效，返回本次调用是否生效。
pub fn init_logger(config: LoggerConfig) -> bool {
    GLOBAL_LOGGER.set(Logger::new(config)).is_ok()
}

/// 获取全局日志器
pub fn get_logger() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

/// 检查全局日志器是否放行指定级别
///
/// 未初始化时按默认配置处理。
pub fn level_enabled(level: LogLevel) -> bool {
    match get_logger() {
        Some(logger) => logger.is_enabled(level),
        None => level <= LoggerConfig::default().level,
    }
}

/// 构建器模式的日志配置
#[derive(Debug, Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// 创建新的配置构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置是否启用日志
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// 设置日志级别
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// 构建配置
    pub fn build(self) -> LoggerConfig {
        self.config
    }

    /// 构建并初始化全局日志器
    pub fn init(self) -> bool {
        init_logger(self.config)
    }
}

/// 创建禁用日志的配置
pub fn disabled_config() -> LoggerConfig {
    LoggerConfigBuilder::new().enabled(false).build()
}

/// 创建开发环境的日志配置
pub fn dev_config() -> LoggerConfig {
    LoggerConfigBuilder::new().level(LogLevel::Debug).build()
}

/// 错误日志
#[macro_export]
macro_rules! sshlog_error {
    ($($arg:tt)*) => {
        if $crate::utils::logger::level_enabled($crate::utils::logger::LogLevel::Error) {
            $crate::rat_logger::error!($($arg)*);
        }
    };
}

/// 警告日志
#[macro_export]
macro_rules! sshlog_warn {
    ($($arg:tt)*) => {
        if $crate::utils::logger::level_enabled($crate::utils::logger::LogLevel::Warn) {
            $crate::rat_logger::warn!($($arg)*);
        }
    };
}

/// 信息日志
#[macro_export]
macro_rules! sshlog_info {
    ($($arg:tt)*) => {
        if $crate::utils::logger::level_enabled($crate::utils::logger::LogLevel::Info) {
            $crate::rat_logger::info!($($arg)*);
        }
    };
}

/// 调试日志
#[macro_export]
macro_rules! sshlog_debug {
    ($($arg:tt)*) => {
        if $crate::utils::logger::level_enabled($crate::utils::logger::LogLevel::Debug) {
            $crate::rat_logger::debug!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filtering() {
        let logger = Logger::new(LoggerConfigBuilder::new().level(LogLevel::Warn).build());
        assert!(logger.is_enabled(LogLevel::Error));
        assert!(logger.is_enabled(LogLevel::Warn));
        assert!(!logger.is_enabled(LogLevel::Info));
        assert!(!logger.is_enabled(LogLevel::Debug));
    }

    #[test]
    fn test_disabled_config_blocks_everything() {
        let logger = Logger::new(disabled_config());
        assert!(!logger.is_enabled(LogLevel::Error));
    }

    #[test]
    fn test_dev_config() {
        let logger = Logger::new(dev_config());
        assert!(logger.is_enabled(LogLevel::Debug));
        assert!(!logger.is_enabled(LogLevel::Trace));
    }
}
