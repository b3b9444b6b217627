//! 流状态快照
//!
//! 快照读取和已输出标记都不自己加锁：调用方传入的是已持有的锁守卫
//! 解引用出的 `FlowState`，同一个读取函数因此能在读锁和写锁下复用。

use crate::core::flow::FlowState;
use crate::core::protocol::AppProtocol;
use crate::ssh::{SshBanner, SshState};

/// 一次调用内使用的只读状态副本
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// 流上的协议是否为SSH且带有SSH状态
    pub protocol_matches: bool,
    /// 客户端横幅
    pub client_banner: Option<SshBanner>,
    /// 服务端横幅
    pub server_banner: Option<SshBanner>,
    /// 是否已输出过日志
    pub already_logged: bool,
}

impl Snapshot {
    /// 从已加锁的流状态中读取快照
    ///
    /// 没有协议状态或协议不是SSH时返回 `protocol_matches = false`
    /// 且其他字段为空的快照，这不是错误。
    pub fn read(state: &FlowState) -> Self {
        if state.app_protocol != Some(AppProtocol::SSH) {
            return Self::default();
        }

        match state.app_state_as::<SshState>() {
            Some(ssh) => Self {
                protocol_matches: true,
                client_banner: ssh.client_banner().cloned(),
                server_banner: ssh.server_banner().cloned(),
                already_logged: ssh.is_logged(),
            },
            None => Self::default(),
        }
    }
}

/// 把流上的SSH状态标记为已输出
///
/// 调用方必须持有写锁，并且是做出输出判定的同一次加锁。
/// 返回是否发生了 false → true 的转换。
pub fn mark_logged(state: &mut FlowState) -> bool {
    state
        .app_state_as_mut::<SshState>()
        .map(SshState::mark_logged)
        .unwrap_or(false)
}
