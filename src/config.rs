//! 配置模块
//!
//! SSH日志器的输出配置，可由JSON反序列化。

use crate::error::{EmitError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认输出文件名
pub const DEFAULT_LOG_FILENAME: &str = "ssh.json";

/// 输出模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// 独立输出到自己的文件
    Standalone,
    /// 作为eve-log的子日志器，写入父日志器的输出端
    EveLog,
}

/// SSH日志器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshLogConfig {
    /// 输出文件名
    pub filename: String,
    /// 输出目录
    pub log_dir: PathBuf,
    /// 是否追加写入
    pub append: bool,
    /// 输出模式
    pub mode: OutputMode,
}

impl Default for SshLogConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_LOG_FILENAME.to_string(),
            log_dir: PathBuf::from("."),
            append: true,
            mode: OutputMode::Standalone,
        }
    }
}

impl SshLogConfig {
    /// 从JSON字符串解析配置，缺省字段取默认值
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EmitError::config_error(format!("JSON error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.mode == OutputMode::Standalone && self.filename.trim().is_empty() {
            return Err(EmitError::config_error("filename must not be empty"));
        }
        Ok(())
    }

    /// 输出文件完整路径
    pub fn output_path(&self) -> PathBuf {
        self.log_dir.join(&self.filename)
    }
}
