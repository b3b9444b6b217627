//! 输出统计

use crate::emit::emitter::EmitOutcome;
use crate::emit::gate::SkipReason;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// 日志器统计（工作线程间共享）
#[derive(Debug, Default)]
pub struct EmitterStats {
    emitted: AtomicU64,
    skipped_logged: AtomicU64,
    skipped_incomplete: AtomicU64,
    not_applicable: AtomicU64,
    no_flow: AtomicU64,
    not_tcp: AtomicU64,
    sink_failures: AtomicU64,
}

/// 统计快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// 已输出事件数
    pub emitted: u64,
    /// 因已输出而跳过
    pub skipped_logged: u64,
    /// 因状态不完整而跳过
    pub skipped_incomplete: u64,
    /// 非SSH流
    pub not_applicable: u64,
    /// 数据包没有关联流
    pub no_flow: u64,
    /// 非TCP数据包
    pub not_tcp: u64,
    /// 输出端拒绝次数
    pub sink_failures: u64,
}

impl StatsSnapshot {
    /// 处理过的数据包总数
    pub fn total(&self) -> u64 {
        self.emitted
            + self.skipped_logged
            + self.skipped_incomplete
            + self.not_applicable
            + self.no_flow
            + self.not_tcp
            + self.sink_failures
    }
}

impl EmitterStats {
    /// 创建新的统计
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次处理结果
    pub fn record(&self, outcome: EmitOutcome) {
        let counter = match outcome {
            EmitOutcome::Emitted => &self.emitted,
            EmitOutcome::Skipped(SkipReason::AlreadyLogged) => &self.skipped_logged,
            EmitOutcome::Skipped(SkipReason::Incomplete) => &self.skipped_incomplete,
            EmitOutcome::NotApplicable => &self.not_applicable,
            EmitOutcome::NoFlow => &self.no_flow,
            EmitOutcome::NotTcp => &self.not_tcp,
            EmitOutcome::SinkRejected => &self.sink_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// 读取当前统计
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            emitted: self.emitted.load(Ordering::Relaxed),
            skipped_logged: self.skipped_logged.load(Ordering::Relaxed),
            skipped_incomplete: self.skipped_incomplete.load(Ordering::Relaxed),
            not_applicable: self.not_applicable.load(Ordering::Relaxed),
            no_flow: self.no_flow.load(Ordering::Relaxed),
            not_tcp: self.not_tcp.load(Ordering::Relaxed),
            sink_failures: self.sink_failures.load(Ordering::Relaxed),
        }
    }
}
