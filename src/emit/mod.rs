//! 一次性事件输出
//!
//! 快照读取、输出判定、事件渲染、已输出标记，以及把它们按正确的锁范围串起来的日志器。

pub mod emitter;
pub mod event;
pub mod gate;
pub mod snapshot;
pub mod stats;

pub use emitter::{EmitOutcome, SshLogEmitter};
pub use event::{SshEndpoint, SshEvent, SshRecord};
pub use gate::{decide, Decision, Handshake, SkipReason};
pub use snapshot::{mark_logged, Snapshot};
pub use stats::{EmitterStats, StatsSnapshot};
