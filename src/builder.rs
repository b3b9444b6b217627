//! 日志器构造器模块
//!
//! 提供链式API来构建和配置SSH事件日志器。

use crate::config::{OutputMode, SshLogConfig};
use crate::emit::SshLogEmitter;
use crate::error::{EmitError, Result};
use crate::output::EventSink;
use std::path::PathBuf;
use std::sync::Arc;

/// 日志器构造器
///
/// 不限制实例数量：同一进程内可以同时存在多个SSH日志器，
/// 例如一个独立文件输出、一个挂在eve-log下。
///
/// # 示例
///
/// ```rust
/// use ssh_flow_logger::EmitterBuilder;
/// use ssh_flow_logger::output::MemorySink;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let eve = Arc::new(MemorySink::new());
/// let emitter = EmitterBuilder::new()
///     .eve_log(eve)
///     .with_instance_id("worker-pool-0")
///     .build()?;
/// assert_eq!(emitter.instance_id(), "worker-pool-0");
/// # Ok(())
/// # }
/// ```
pub struct EmitterBuilder {
    config: SshLogConfig,
    sink: Option<Arc<dyn EventSink>>,
    instance_id: Option<String>,
}

impl Default for EmitterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmitterBuilder {
    /// 创建新的构造器
    pub fn new() -> Self {
        Self::from_config(SshLogConfig::default())
    }

    /// 从配置创建构造器
    pub fn from_config(config: SshLogConfig) -> Self {
        Self {
            config,
            sink: None,
            instance_id: None,
        }
    }

    /// 设置输出文件名
    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.config.filename = filename.into();
        self
    }

    /// 设置输出目录
    pub fn with_log_dir<P: Into<PathBuf>>(mut self, log_dir: P) -> Self {
        self.config.log_dir = log_dir.into();
        self
    }

    /// 设置是否追加写入
    pub fn append(mut self, append: bool) -> Self {
        self.config.append = append;
        self
    }

    /// 使用自定义输出端（独立模式）
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// 作为eve-log子日志器，写入父日志器的输出端
    pub fn eve_log(mut self, parent: Arc<dyn EventSink>) -> Self {
        self.config.mode = OutputMode::EveLog;
        self.sink = Some(parent);
        self
    }

    /// 设置实例ID
    pub fn with_instance_id<S: Into<String>>(mut self, instance_id: S) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    /// 获取当前配置
    pub fn config(&self) -> &SshLogConfig {
        &self.config
    }

    /// 构建日志器
    pub fn build(self) -> Result<SshLogEmitter> {
        self.config.validate()?;

        let sink = match (self.config.mode, self.sink) {
            (_, Some(sink)) => sink,
            (OutputMode::EveLog, None) => {
                return Err(EmitError::config_error(
                    "eve-log mode requires a parent output sink",
                ));
            }
            (OutputMode::Standalone, None) => Self::open_file_sink(&self.config)?,
        };

        Ok(match self.instance_id {
            Some(instance_id) => SshLogEmitter::with_instance_id(sink, instance_id),
            None => SshLogEmitter::new(sink),
        })
    }

    #[cfg(feature = "file-sink")]
    fn open_file_sink(config: &SshLogConfig) -> Result<Arc<dyn EventSink>> {
        let sink = crate::output::JsonFileSink::open(config.output_path(), config.append)?;
        Ok(Arc::new(sink))
    }

    #[cfg(not(feature = "file-sink"))]
    fn open_file_sink(_config: &SshLogConfig) -> Result<Arc<dyn EventSink>> {
        Err(EmitError::config_error(
            "file output requires the `file-sink` feature",
        ))
    }
}
