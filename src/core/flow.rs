//! 流模块
//!
//! 双向网络会话及其受锁保护的应用层状态。流由外部流表持有，
//! 日志器只通过读写锁访问其中的状态。

use crate::core::protocol::{AppProtocol, Transport};
use crate::error::{EmitError, Result};
use std::any::Any;
use std::fmt;
use std::net::IpAddr;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 流标识（规范化五元组，较小的地址端口对总在前）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlowKey {
    /// 地址A
    pub ip_a: IpAddr,
    /// 端口A
    pub port_a: u16,
    /// 地址B
    pub ip_b: IpAddr,
    /// 端口B
    pub port_b: u16,
    /// 传输层协议
    pub transport: Transport,
}

impl FlowKey {
    /// 从一个方向的地址对构造规范化流标识
    pub fn new(
        src_ip: IpAddr,
        src_port: u16,
        dst_ip: IpAddr,
        dst_port: u16,
        transport: Transport,
    ) -> Self {
        if (src_ip, src_port) <= (dst_ip, dst_port) {
            Self {
                ip_a: src_ip,
                port_a: src_port,
                ip_b: dst_ip,
                port_b: dst_port,
                transport,
            }
        } else {
            Self {
                ip_a: dst_ip,
                port_a: dst_port,
                ip_b: src_ip,
                port_b: src_port,
                transport,
            }
        }
    }
}

/// 应用层协议状态
///
/// 由外部协议解析器实现并挂到流上。日志器通过 `as_any` 向下转型到具体类型。
pub trait AppLayerState: Send + Sync + fmt::Debug {
    /// 该状态所属的协议
    fn protocol(&self) -> AppProtocol;

    /// 转为 `Any` 引用
    fn as_any(&self) -> &dyn Any;

    /// 转为可变 `Any` 引用
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// 受流锁保护的状态
#[derive(Debug, Default)]
pub struct FlowState {
    /// 识别出的应用层协议
    pub app_protocol: Option<AppProtocol>,
    /// 应用层协议状态
    pub app_state: Option<Box<dyn AppLayerState>>,
}

impl FlowState {
    /// 以指定类型借用应用层状态
    ///
    /// 状态不存在或类型不符时返回 `None`。
    pub fn app_state_as<T: 'static>(&self) -> Option<&T> {
        self.app_state.as_ref()?.as_any().downcast_ref::<T>()
    }

    /// 以指定类型可变借用应用层状态
    pub fn app_state_as_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.app_state.as_mut()?.as_any_mut().downcast_mut::<T>()
    }
}

/// 网络流
#[derive(Debug)]
pub struct Flow {
    id: u64,
    key: FlowKey,
    state: RwLock<FlowState>,
}

impl Flow {
    /// 创建新的流
    pub fn new(id: u64, key: FlowKey) -> Self {
        Self {
            id,
            key,
            state: RwLock::new(FlowState::default()),
        }
    }

    /// 流ID
    pub fn id(&self) -> u64 {
        self.id
    }

    /// 流标识
    pub fn key(&self) -> &FlowKey {
        &self.key
    }

    /// 获取读锁（阻塞）
    pub fn read(&self) -> Result<RwLockReadGuard<'_, FlowState>> {
        self.state
            .read()
            .map_err(|_| EmitError::lock_poisoned(self.id, "read"))
    }

    /// 获取写锁（阻塞）
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, FlowState>> {
        self.state
            .write()
            .map_err(|_| EmitError::lock_poisoned(self.id, "write"))
    }

    /// 设置应用层协议及其状态
    pub fn attach_app_state(&self, state: Box<dyn AppLayerState>) -> Result<()> {
        let mut guard = self.write()?;
        guard.app_protocol = Some(state.protocol());
        guard.app_state = Some(state);
        Ok(())
    }

    /// 仅设置应用层协议（解析器尚未创建状态）
    pub fn set_app_protocol(&self, protocol: AppProtocol) -> Result<()> {
        self.write()?.app_protocol = Some(protocol);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn addr(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn test_flow_key_normalized() {
        let forward = FlowKey::new(addr(1), 50000, addr(2), 22, Transport::TCP);
        let reverse = FlowKey::new(addr(2), 22, addr(1), 50000, Transport::TCP);
        assert_eq!(forward, reverse);
        assert_eq!(forward.ip_a, addr(1));
    }

    #[test]
    fn test_flow_key_transport_distinguishes() {
        let tcp = FlowKey::new(addr(1), 53, addr(2), 53, Transport::TCP);
        let udp = FlowKey::new(addr(1), 53, addr(2), 53, Transport::UDP);
        assert_ne!(tcp, udp);
    }

    #[test]
    fn test_set_app_protocol_without_state() {
        let flow = Flow::new(7, FlowKey::new(addr(1), 1, addr(2), 2, Transport::TCP));
        flow.set_app_protocol(AppProtocol::SSH).unwrap();

        let guard = flow.read().unwrap();
        assert_eq!(guard.app_protocol, Some(AppProtocol::SSH));
        assert!(guard.app_state.is_none());
    }
}
