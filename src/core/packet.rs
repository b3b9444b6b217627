//! 数据包模块

use crate::core::flow::Flow;
use crate::core::protocol::Transport;
use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;

/// 进入日志阶段的数据包视图
///
/// 只保留日志器需要的字段：所属流、传输层协议、地址和抓包时间戳。
#[derive(Debug, Clone)]
pub struct Packet {
    /// 所属流（流表未命中时为空）
    pub flow: Option<Arc<Flow>>,
    /// 传输层协议
    pub transport: Transport,
    /// 源地址
    pub src_ip: IpAddr,
    /// 源端口
    pub src_port: u16,
    /// 目的地址
    pub dst_ip: IpAddr,
    /// 目的端口
    pub dst_port: u16,
    /// 抓包时间戳
    pub timestamp: DateTime<Utc>,
}

impl Packet {
    /// 创建新的TCP数据包，时间戳取当前时间
    pub fn tcp(src_ip: IpAddr, src_port: u16, dst_ip: IpAddr, dst_port: u16) -> Self {
        Self {
            flow: None,
            transport: Transport::TCP,
            src_ip,
            src_port,
            dst_ip,
            dst_port,
            timestamp: Utc::now(),
        }
    }

    /// 关联流
    pub fn with_flow(mut self, flow: Arc<Flow>) -> Self {
        self.flow = Some(flow);
        self
    }

    /// 设置传输层协议
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// 设置时间戳
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// 是否为TCP数据包
    pub fn is_tcp(&self) -> bool {
        self.transport.is_tcp()
    }
}
