//! 流表模块
//!
//! 按五元组索引的流注册表，多个工作线程共享。

use crate::core::flow::{Flow, FlowKey};
use crate::core::packet::Packet;
use crate::error::{EmitError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// 流表
#[derive(Debug)]
pub struct FlowTable {
    flows: RwLock<HashMap<FlowKey, Arc<Flow>>>,
    next_id: AtomicU64,
}

impl Default for FlowTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowTable {
    /// 创建空流表
    pub fn new() -> Self {
        Self {
            flows: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// 查找或创建流
    ///
    /// 返回流以及是否为新建。
    pub fn get_or_create(&self, key: FlowKey) -> Result<(Arc<Flow>, bool)> {
        if let Some(flow) = self.get(&key)? {
            return Ok((flow, false));
        }

        let mut flows = self
            .flows
            .write()
            .map_err(|_| EmitError::internal_error("Failed to write flow table"))?;

        // 读锁释放后可能已被其他线程插入
        if let Some(flow) = flows.get(&key) {
            return Ok((Arc::clone(flow), false));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let flow = Arc::new(Flow::new(id, key.clone()));
        flows.insert(key, Arc::clone(&flow));
        Ok((flow, true))
    }

    /// 为数据包查找或创建流，并把流挂到数据包上
    pub fn attach(&self, packet: Packet) -> Result<Packet> {
        let key = FlowKey::new(
            packet.src_ip,
            packet.src_port,
            packet.dst_ip,
            packet.dst_port,
            packet.transport,
        );
        let (flow, _) = self.get_or_create(key)?;
        Ok(packet.with_flow(flow))
    }

    /// 查找流
    pub fn get(&self, key: &FlowKey) -> Result<Option<Arc<Flow>>> {
        let flows = self
            .flows
            .read()
            .map_err(|_| EmitError::internal_error("Failed to read flow table"))?;
        Ok(flows.get(key).cloned())
    }

    /// 移除流
    pub fn remove(&self, key: &FlowKey) -> Result<Option<Arc<Flow>>> {
        let mut flows = self
            .flows
            .write()
            .map_err(|_| EmitError::internal_error("Failed to write flow table"))?;
        Ok(flows.remove(key))
    }

    /// 流数量
    pub fn len(&self) -> Result<usize> {
        let flows = self
            .flows
            .read()
            .map_err(|_| EmitError::internal_error("Failed to read flow table"))?;
        Ok(flows.len())
    }

    /// 是否为空
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
