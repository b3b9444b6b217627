//! SSH版本横幅
//!
//! 标识串格式为 `SSH-<protoversion>-<softwareversion> SP <comments> CR LF`，
//! 注释部分不进入日志。

use crate::error::{EmitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const BANNER_PREFIX: &str = "SSH-";

/// 解析后的SSH版本横幅
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshBanner {
    /// 协议版本，例如 `2.0`
    pub proto_version: String,
    /// 软件版本，例如 `OpenSSH_8.1`
    pub software_version: String,
}

impl SshBanner {
    /// 直接由两个字段构造
    pub fn new<P, S>(proto_version: P, software_version: S) -> Self
    where
        P: Into<String>,
        S: Into<String>,
    {
        Self {
            proto_version: proto_version.into(),
            software_version: software_version.into(),
        }
    }

    /// 解析标识串
    pub fn parse(line: &str) -> Result<Self> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        let rest = trimmed
            .strip_prefix(BANNER_PREFIX)
            .ok_or_else(|| EmitError::invalid_banner(trimmed))?;

        let (proto_version, remainder) = rest
            .split_once('-')
            .ok_or_else(|| EmitError::invalid_banner(trimmed))?;

        let software_version = remainder
            .split_once(' ')
            .map_or(remainder, |(software, _comments)| software);

        if proto_version.is_empty() || software_version.is_empty() {
            return Err(EmitError::invalid_banner(trimmed));
        }

        Ok(Self::new(proto_version, software_version))
    }
}

impl fmt::Display for SshBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SSH-{}-{}", self.proto_version, self.software_version)
    }
}
