//! # ssh_flow_logger: 每流一次的SSH握手事件日志器
//!
//! 运行在流量检测流水线的日志阶段：当某个被识别为SSH的流两端版本横幅都已解析完成时，
//! 把握手信息渲染成一条JSON事件交给输出端，并保证同一个流只输出一次，
//! 即使多个工作线程同时处理该流的数据包。
//!
//! ## 特性
//!
//! - **一次性输出**: 判定、渲染、输出、标记在同一次写锁内完成
//! - **读锁预检**: 横幅未到齐等常见路径只取读锁
//! - **失败可重试**: 输出端拒绝时不标记，后续数据包重新尝试
//! - **多实例**: 独立文件输出和eve-log子日志器可并存
//!
//! ## 快速开始
//!
//! ```rust
//! use ssh_flow_logger::core::{FlowTable, Packet};
//! use ssh_flow_logger::output::MemorySink;
//! use ssh_flow_logger::ssh::SshState;
//! use ssh_flow_logger::{EmitOutcome, EmitterBuilder};
//! use std::net::{IpAddr, Ipv4Addr};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sink = Arc::new(MemorySink::new());
//! let emitter = EmitterBuilder::new().with_sink(sink.clone()).build()?;
//!
//! let table = FlowTable::new();
//! let client = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
//! let server = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
//! let packet = table.attach(Packet::tcp(client, 50022, server, 22))?;
//!
//! let mut ssh = SshState::new();
//! ssh.record_client_line("SSH-2.0-OpenSSH_8.1")?;
//! ssh.record_server_line("SSH-2.0-dropbear")?;
//! packet.flow.as_ref().unwrap().attach_app_state(Box::new(ssh))?;
//!
//! assert_eq!(emitter.process(&packet)?, EmitOutcome::Emitted);
//! assert_eq!(sink.len()?, 1);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// 核心模块
pub mod core;
pub mod error;
pub mod ssh;

// 工具模块
pub mod utils;

// 功能模块
pub mod emit;
pub mod output;

// 配置与构造器
pub mod builder;
pub mod config;

#[doc(hidden)]
pub use rat_logger;

// 重新导出核心类型
pub use crate::builder::EmitterBuilder;
pub use crate::config::{OutputMode, SshLogConfig};
pub use crate::emit::{EmitOutcome, SshEvent, SshLogEmitter};
pub use crate::error::{EmitError, Result};

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 库描述
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
