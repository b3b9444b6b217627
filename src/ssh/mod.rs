//! SSH协议状态
//!
//! 解析器写入的横幅字段和日志器使用的“已输出”标记。

pub mod banner;
pub mod state;

pub use banner::SshBanner;
pub use state::SshState;
