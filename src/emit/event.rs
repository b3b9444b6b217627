//! SSH事件渲染
//!
//! 事件体是横幅字段的直接结构拷贝，不做截断或转义，
//! 转义交给JSON序列化。

use crate::core::packet::Packet;
use crate::core::protocol::AppProtocol;
use crate::emit::gate::Handshake;
use crate::ssh::SshBanner;
use serde::{Deserialize, Serialize};

/// 事件时间戳格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%z";

/// 一端的版本信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshEndpoint {
    /// 协议版本
    pub proto_version: String,
    /// 软件版本
    pub software_version: String,
}

impl From<&SshBanner> for SshEndpoint {
    fn from(banner: &SshBanner) -> Self {
        Self {
            proto_version: banner.proto_version.clone(),
            software_version: banner.software_version.clone(),
        }
    }
}

/// `ssh` 字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshRecord {
    /// 客户端
    pub client: SshEndpoint,
    /// 服务端
    pub server: SshEndpoint,
}

/// 输出的SSH事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshEvent {
    /// 数据包时间戳
    pub timestamp: String,
    /// 流ID
    pub flow_id: u64,
    /// 事件类型，固定为 `ssh`
    pub event_type: String,
    /// 源地址
    pub src_ip: String,
    /// 源端口
    pub src_port: u16,
    /// 目的地址
    pub dest_ip: String,
    /// 目的端口
    pub dest_port: u16,
    /// 传输层协议
    pub proto: String,
    /// SSH握手信息
    pub ssh: SshRecord,
}

impl SshEvent {
    /// 由握手视图和触发数据包渲染事件
    ///
    /// `handshake` 只能来自判定结果 `LogNow`，两端横幅必然存在。
    pub fn render(handshake: Handshake<'_>, packet: &Packet, flow_id: u64) -> Self {
        Self {
            timestamp: packet.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            flow_id,
            event_type: AppProtocol::SSH.event_type().to_string(),
            src_ip: packet.src_ip.to_string(),
            src_port: packet.src_port,
            dest_ip: packet.dst_ip.to_string(),
            dest_port: packet.dst_port,
            proto: packet.transport.to_string(),
            ssh: SshRecord {
                client: SshEndpoint::from(handshake.client),
                server: SshEndpoint::from(handshake.server),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_render_envelope_and_body() {
        let client = SshBanner::new("2.0", "libssh");
        let server = SshBanner::new("2.0", "dropbear");
        let packet = Packet::tcp(
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            41000,
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
            22,
        )
        .with_timestamp(Utc.with_ymd_and_hms(2014, 3, 1, 12, 30, 5).unwrap());

        let event = SshEvent::render(
            Handshake {
                client: &client,
                server: &server,
            },
            &packet,
            42,
        );

        assert_eq!(event.timestamp, "2014-03-01T12:30:05.000000+0000");
        assert_eq!(event.event_type, "ssh");
        assert_eq!(event.proto, "TCP");
        assert_eq!(event.flow_id, 42);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["ssh"]["client"]["software_version"], "libssh");
        assert_eq!(json["ssh"]["server"]["software_version"], "dropbear");
        assert_eq!(json["ssh"]["server"]["proto_version"], "2.0");
        assert_eq!(json["dest_port"], 22);
    }
}
