//! 协议定义模块
//!
//! 定义流上可识别的传输层与应用层协议类型。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 应用层协议类型
///
/// 由上游协议识别阶段写入流状态，日志器只读取它。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AppProtocol {
    /// HTTP
    HTTP,
    /// TLS
    TLS,
    /// SSH
    SSH,
    /// DNS
    DNS,
    /// SMTP
    SMTP,
    /// FTP
    FTP,
    /// 识别失败
    Failed,
}

impl fmt::Display for AppProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HTTP => write!(f, "HTTP"),
            Self::TLS => write!(f, "TLS"),
            Self::SSH => write!(f, "SSH"),
            Self::DNS => write!(f, "DNS"),
            Self::SMTP => write!(f, "SMTP"),
            Self::FTP => write!(f, "FTP"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl AppProtocol {
    /// 事件中使用的小写协议标签
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::HTTP => "http",
            Self::TLS => "tls",
            Self::SSH => "ssh",
            Self::DNS => "dns",
            Self::SMTP => "smtp",
            Self::FTP => "ftp",
            Self::Failed => "failed",
        }
    }
}

/// 传输层协议
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Transport {
    /// TCP
    TCP,
    /// UDP
    UDP,
    /// ICMP
    ICMP,
    /// 其他IP协议号
    Other(u8),
}

impl Transport {
    /// 检查是否为TCP
    pub fn is_tcp(&self) -> bool {
        matches!(self, Self::TCP)
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TCP => write!(f, "TCP"),
            Self::UDP => write!(f, "UDP"),
            Self::ICMP => write!(f, "ICMP"),
            Self::Other(proto) => write!(f, "{:03}", proto),
        }
    }
}
