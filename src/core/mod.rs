//! 核心模块
//!
//! 流、数据包和协议类型。

pub mod flow;
pub mod packet;
pub mod protocol;
pub mod table;

pub use flow::{AppLayerState, Flow, FlowKey, FlowState};
pub use packet::Packet;
pub use protocol::{AppProtocol, Transport};
pub use table::FlowTable;
