//! 内存输出端

use crate::emit::event::SshEvent;
use crate::error::{EmitError, Result};
use crate::output::EventSink;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// 把事件收集在内存中的输出端
///
/// 可以切换为拒绝模式，用于验证失败路径。
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SshEvent>>,
    rejecting: AtomicBool,
    attempts: AtomicU64,
}

impl MemorySink {
    /// 创建新的内存输出端
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置是否拒绝后续事件
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// 已接收的事件
    pub fn events(&self) -> Result<Vec<SshEvent>> {
        Ok(self.lock_events()?.clone())
    }

    /// 已接收的事件数
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock_events()?.len())
    }

    /// 是否未接收任何事件
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// 调用 `accept` 的总次数（含被拒绝的）
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl MemorySink {
    fn lock_events(&self) -> Result<MutexGuard<'_, Vec<SshEvent>>> {
        self.events
            .lock()
            .map_err(|_| EmitError::internal_error("Failed to lock memory sink"))
    }
}

impl EventSink for MemorySink {
    fn accept(&self, event: &SshEvent) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.rejecting.load(Ordering::SeqCst) {
            return Err(EmitError::sink_rejected(self.name(), "sink is rejecting"));
        }

        self.lock_events()?.push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
