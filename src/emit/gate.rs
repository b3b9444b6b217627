//! 输出判定
//!
//! 判定规则按顺序：
//! 1. 协议不匹配 → 不适用
//! 2. 已输出 → 跳过
//! 3. 任一横幅缺失 → 跳过（状态尚不完整）
//! 4. 否则 → 立即输出
//!
//! 两端横幅到齐即输出，不等待会话结束。

use crate::emit::snapshot::Snapshot;
use crate::ssh::SshBanner;
use serde::Serialize;

/// 跳过原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// 该流已输出过
    AlreadyLogged,
    /// 横幅尚未到齐
    Incomplete,
}

/// 两端横幅都已就绪的握手视图
///
/// 只能由 [`decide`] 在返回 [`Decision::LogNow`] 时构造，渲染器因此不会看到缺失的横幅。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handshake<'a> {
    /// 客户端横幅
    pub client: &'a SshBanner,
    /// 服务端横幅
    pub server: &'a SshBanner,
}

/// 判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<'a> {
    /// 立即输出
    LogNow(Handshake<'a>),
    /// 跳过
    Skip(SkipReason),
    /// 不适用（不是SSH流）
    NotApplicable,
}

/// 对快照做出判定
pub fn decide(snapshot: &Snapshot) -> Decision<'_> {
    if !snapshot.protocol_matches {
        return Decision::NotApplicable;
    }

    if snapshot.already_logged {
        return Decision::Skip(SkipReason::AlreadyLogged);
    }

    match (&snapshot.client_banner, &snapshot.server_banner) {
        (Some(client), Some(server)) => Decision::LogNow(Handshake { client, server }),
        _ => Decision::Skip(SkipReason::Incomplete),
    }
}
