//! 输出模块
//!
//! 事件输出端接口及其实现。输出端负责持久化，日志器只负责把事件交给它，
//! 并根据返回值决定是否标记流为已输出。

#[cfg(feature = "file-sink")]
pub mod file;
pub mod memory;

use crate::emit::event::SshEvent;
use crate::error::Result;
use std::fmt;

#[cfg(feature = "file-sink")]
pub use file::{JsonFileSink, JsonLineSink};
pub use memory::MemorySink;

/// 事件输出端
///
/// 返回 `Ok(())` 表示事件已被接收；任何错误都视为拒绝，
/// 日志器不会标记该流，后续数据包会重新尝试。
pub trait EventSink: Send + Sync + fmt::Debug {
    /// 接收一个事件
    fn accept(&self, event: &SshEvent) -> Result<()>;

    /// 输出端名称
    fn name(&self) -> &str;
}
