//! JSON行输出端
//!
//! 每个事件先序列化到独立的行缓冲，再在互斥锁内一次写入目标并刷新。
//! 目标本身不做缓冲：写入失败的行不会残留，重试时也就不会重复写出。

use crate::emit::event::SshEvent;
use crate::error::{EmitError, Result};
use crate::output::EventSink;
use bytes::{BufMut, BytesMut};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 单行事件缓冲初始容量
const LINE_BUFFER_CAPACITY: usize = 512;

/// 写入任意目标的JSON行输出端
pub struct JsonLineSink<W> {
    name: String,
    path: Option<PathBuf>,
    writer: Mutex<W>,
}

/// 追加写入的JSON行文件输出端
pub type JsonFileSink = JsonLineSink<File>;

impl JsonLineSink<File> {
    /// 打开输出文件
    ///
    /// `append` 为 false 时清空已有内容。
    pub fn open<P: AsRef<Path>>(path: P, append: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let file = options.open(&path)?;

        crate::sshlog_info!("SSH log output opened: {}", path.display());

        Ok(Self {
            name: "json-file".to_string(),
            path: Some(path),
            writer: Mutex::new(file),
        })
    }
}

impl<W: Write + Send> JsonLineSink<W> {
    /// 包装任意写入目标
    pub fn from_writer<S: Into<String>>(name: S, writer: W) -> Self {
        Self {
            name: name.into(),
            path: None,
            writer: Mutex::new(writer),
        }
    }

    /// 输出文件路径（非文件目标为 `None`）
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn encode(event: &SshEvent) -> Result<BytesMut> {
        let mut writer = BytesMut::with_capacity(LINE_BUFFER_CAPACITY).writer();
        serde_json::to_writer(&mut writer, event)?;
        let mut line = writer.into_inner();
        line.put_u8(b'\n');
        Ok(line)
    }
}

impl<W> fmt::Debug for JsonLineSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonLineSink")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish()
    }
}

impl<W: Write + Send> EventSink for JsonLineSink<W> {
    fn accept(&self, event: &SshEvent) -> Result<()> {
        let line = Self::encode(event)?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| EmitError::sink_rejected(self.name(), "writer lock poisoned"))?;
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
