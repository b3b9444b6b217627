//! SSH事件日志器
//!
//! 每个数据包分两步处理：
//!
//! ```text
//! condition (读锁)          log (写锁，整段持有)
//!   快照 → 判定  ──LogNow──→  快照 → 判定 → 渲染 → 输出端 → 标记
//!        │                                 │
//!        └──其他──→ 结束                   └──拒绝──→ 结束（不标记）
//! ```
//!
//! 读锁预检让“横幅未到齐”这类常见路径不争用写锁；写锁阶段重新取快照并重新判定，
//! 判定、渲染、输出和标记都在同一次写锁内完成，因此同一个流最多只会输出一次。
//!
//! 输出端在持有流写锁时被调用。输出端若在 `accept` 中 panic，该流的锁会中毒，之后该流的
//! 每个数据包都返回 [`LockPoisoned`](crate::error::EmitError::LockPoisoned)，其他流不受影响。
//! 输出端应通过返回错误来表示失败，而不是 panic。

use crate::core::packet::Packet;
use crate::emit::event::SshEvent;
use crate::emit::gate::{decide, Decision, SkipReason};
use crate::emit::snapshot::{mark_logged, Snapshot};
use crate::emit::stats::{EmitterStats, StatsSnapshot};
use crate::error::Result;
use crate::output::EventSink;
use serde::Serialize;
use std::sync::Arc;

/// 单个数据包的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitOutcome {
    /// 数据包没有关联流
    NoFlow,
    /// 非TCP数据包
    NotTcp,
    /// 非SSH流
    NotApplicable,
    /// 跳过
    Skipped(SkipReason),
    /// 已输出并标记
    Emitted,
    /// 输出端拒绝，未标记
    SinkRejected,
}

impl EmitOutcome {
    /// 是否输出了事件
    pub fn is_emitted(&self) -> bool {
        matches!(self, Self::Emitted)
    }
}

/// SSH事件日志器
///
/// 本身无每流状态，可在任意多个工作线程间共享（`Arc<SshLogEmitter>`）。
#[derive(Debug)]
pub struct SshLogEmitter {
    instance_id: String,
    sink: Arc<dyn EventSink>,
    stats: EmitterStats,
}

impl SshLogEmitter {
    /// 创建新的日志器
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_instance_id(sink, uuid::Uuid::new_v4().to_string())
    }

    /// 使用指定实例ID创建日志器
    pub fn with_instance_id<S: Into<String>>(sink: Arc<dyn EventSink>, instance_id: S) -> Self {
        Self {
            instance_id: instance_id.into(),
            sink,
            stats: EmitterStats::new(),
        }
    }

    /// 实例ID
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// 输出端
    pub fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    /// 当前统计
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// 读锁预检：是否值得进入写锁阶段
    pub fn condition(&self, packet: &Packet) -> Result<bool> {
        Ok(self.precheck(packet)?.is_none())
    }

    /// 写锁阶段：判定、渲染、输出、标记
    ///
    /// 可以不经 [`condition`](Self::condition) 直接调用，无流和非TCP数据包同样被忽略。
    pub fn log(&self, packet: &Packet) -> Result<EmitOutcome> {
        let Some(flow) = packet.flow.as_ref() else {
            return Ok(EmitOutcome::NoFlow);
        };

        if !packet.is_tcp() {
            return Ok(EmitOutcome::NotTcp);
        }

        let mut guard = flow.write().map_err(|err| {
            crate::sshlog_error!("[{}] {}", self.instance_id, err);
            err
        })?;

        let snapshot = Snapshot::read(&guard);
        let handshake = match decide(&snapshot) {
            Decision::LogNow(handshake) => handshake,
            Decision::Skip(reason) => return Ok(EmitOutcome::Skipped(reason)),
            Decision::NotApplicable => return Ok(EmitOutcome::NotApplicable),
        };

        let event = SshEvent::render(handshake, packet, flow.id());
        if let Err(err) = self.sink.accept(&event) {
            crate::sshlog_warn!(
                "[{}] sink {} rejected ssh event for flow {}: {}",
                self.instance_id,
                self.sink.name(),
                flow.id(),
                err
            );
            return Ok(EmitOutcome::SinkRejected);
        }

        mark_logged(&mut guard);
        crate::sshlog_debug!("[{}] ssh event logged for flow {}", self.instance_id, flow.id());
        Ok(EmitOutcome::Emitted)
    }

    /// 处理一个数据包
    pub fn process(&self, packet: &Packet) -> Result<EmitOutcome> {
        let outcome = match self.precheck(packet)? {
            Some(outcome) => outcome,
            None => self.log(packet)?,
        };
        self.stats.record(outcome);
        Ok(outcome)
    }

    /// 返回 `None` 表示应进入写锁阶段
    fn precheck(&self, packet: &Packet) -> Result<Option<EmitOutcome>> {
        let Some(flow) = packet.flow.as_ref() else {
            return Ok(Some(EmitOutcome::NoFlow));
        };

        if !packet.is_tcp() {
            return Ok(Some(EmitOutcome::NotTcp));
        }

        let guard = flow.read().map_err(|err| {
            crate::sshlog_error!("[{}] {}", self.instance_id, err);
            err
        })?;

        let snapshot = Snapshot::read(&guard);
        let outcome = match decide(&snapshot) {
            Decision::LogNow(_) => None,
            Decision::Skip(reason) => Some(EmitOutcome::Skipped(reason)),
            Decision::NotApplicable => Some(EmitOutcome::NotApplicable),
        };
        Ok(outcome)
    }
}
