//! 提交流水线 - 业务能力层
//!
//! 四个严格有序的 Git Data API 调用：
//! 1. 读取分支 head
//! 2. 基于 head 创建只含一个文件的 tree
//! 3. 创建以 head 为唯一父提交的 commit
//! 4. 将分支快进到新 commit
//!
//! 不重试、不回滚。第 4 步失败时新 commit 不被任何分支引用。

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{ApiError, CommitError};
use crate::models::{CreatedCommit, Sha};

/// Git Data API 能力
#[async_trait]
pub trait GitDataApi: Send + Sync {
    /// 目标分支当前指向的提交
    async fn get_head_ref(&self) -> Result<Sha, ApiError>;

    /// 在 `base_tree` 之上加入 `<目录>/<filename>`
    async fn create_tree(&self, content: &str, filename: &str, base_tree: &Sha)
        -> Result<Sha, ApiError>;

    async fn create_commit(
        &self,
        message: &str,
        tree: &Sha,
        parent: &Sha,
    ) -> Result<CreatedCommit, ApiError>;

    /// 非强制更新，非快进更新会被服务端拒绝
    async fn update_head_ref(&self, sha: &Sha) -> Result<(), ApiError>;
}

/// 上传题解文件，返回新提交
pub async fn upload_solution<A>(
    api: &A,
    content: &str,
    filename: &str,
    message: &str,
) -> Result<CreatedCommit, CommitError>
where
    A: GitDataApi + ?Sized,
{
    let head = api.get_head_ref().await.map_err(CommitError::HeadRef)?;
    info!("✓ 当前 head: {}", head);

    let tree = api
        .create_tree(content, filename, &head)
        .await
        .map_err(CommitError::Tree)?;
    info!("✓ 已创建 tree: {}", tree);

    let commit = api
        .create_commit(message, &tree, &head)
        .await
        .map_err(CommitError::Commit)?;
    info!("✓ 已创建 commit: {}", commit.sha);

    if let Err(source) = api.update_head_ref(&commit.sha).await {
        warn!("⚠️ 分支更新失败，commit {} 未被任何分支引用", commit.sha);
        return Err(CommitError::UpdateRef {
            orphaned: commit.sha,
            source,
        });
    }
    info!("✓ 分支已更新");

    Ok(commit)
}
