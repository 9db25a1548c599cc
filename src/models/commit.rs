//! 提交链上的 Git 对象

use std::fmt;

use serde::{Deserialize, Serialize};

/// Git 对象的 SHA
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sha(String);

impl Sha {
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }
}

impl fmt::Display for Sha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 新建的提交
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedCommit {
    pub sha: Sha,
    /// 提交在网页上的地址
    pub html_url: String,
}
