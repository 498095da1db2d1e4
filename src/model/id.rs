//! 标识符类型
//!
//! 定义作业和工作者的唯一标识符。两者都是各自 arena 中的稳定下标。

use serde::{Deserialize, Serialize};

/// 作业标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub usize);

/// 工作者标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkerId(pub usize);
