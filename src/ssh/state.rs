//! SSH每流状态

use crate::core::flow::AppLayerState;
use crate::core::protocol::AppProtocol;
use crate::error::{EmitError, Result};
use crate::ssh::banner::SshBanner;
use std::any::Any;

/// SSH每流状态
///
/// 两端横幅由解析器在握手头完整到达后各写入一次，之后不再变化。
/// `logged` 只会由 false 变为 true 一次。
#[derive(Debug, Default)]
pub struct SshState {
    client_banner: Option<SshBanner>,
    server_banner: Option<SshBanner>,
    logged: bool,
}

impl SshState {
    /// 创建新的SSH状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 客户端横幅
    pub fn client_banner(&self) -> Option<&SshBanner> {
        self.client_banner.as_ref()
    }

    /// 服务端横幅
    pub fn server_banner(&self) -> Option<&SshBanner> {
        self.server_banner.as_ref()
    }

    /// 是否已输出过日志
    pub fn is_logged(&self) -> bool {
        self.logged
    }

    /// 写入客户端横幅
    pub fn set_client_banner(&mut self, banner: SshBanner) -> Result<()> {
        set_once(&mut self.client_banner, banner, "client")
    }

    /// 写入服务端横幅
    pub fn set_server_banner(&mut self, banner: SshBanner) -> Result<()> {
        set_once(&mut self.server_banner, banner, "server")
    }

    /// 解析并写入客户端标识串
    pub fn record_client_line(&mut self, line: &str) -> Result<()> {
        self.set_client_banner(SshBanner::parse(line)?)
    }

    /// 解析并写入服务端标识串
    pub fn record_server_line(&mut self, line: &str) -> Result<()> {
        self.set_server_banner(SshBanner::parse(line)?)
    }

    /// 标记为已输出
    ///
    /// 仅在 false → true 转换时返回 true。
    pub fn mark_logged(&mut self) -> bool {
        if self.logged {
            return false;
        }
        self.logged = true;
        true
    }
}

fn set_once(slot: &mut Option<SshBanner>, banner: SshBanner, side: &'static str) -> Result<()> {
    if slot.is_some() {
        return Err(EmitError::BannerAlreadySet { side });
    }
    *slot = Some(banner);
    Ok(())
}

impl AppLayerState for SshState {
    fn protocol(&self) -> AppProtocol {
        AppProtocol::SSH
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssh_state_creation() {
        let state = SshState::new();
        assert!(state.client_banner().is_none());
        assert!(state.server_banner().is_none());
        assert!(!state.is_logged());
    }

    #[test]
    fn test_banner_is_set_once() {
        let mut state = SshState::new();
        state.record_client_line("SSH-2.0-OpenSSH_8.1").unwrap();

        let err = state.record_client_line("SSH-2.0-PuTTY").unwrap_err();
        assert!(matches!(err, EmitError::BannerAlreadySet { side: "client" }));
        assert_eq!(state.client_banner().unwrap().software_version, "OpenSSH_8.1");
    }

    #[test]
    fn test_invalid_line_leaves_slot_empty() {
        let mut state = SshState::new();
        assert!(state.record_server_line("garbage").is_err());
        assert!(state.server_banner().is_none());
    }

    #[test]
    fn test_mark_logged_transitions_once() {
        let mut state = SshState::new();
        assert!(state.mark_logged());
        assert!(!state.mark_logged());
        assert!(state.is_logged());
    }
}
