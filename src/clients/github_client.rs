/// GitHub API 客户端
///
/// 通过 Git Data API 实现 `GitDataApi`
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::GithubConfig;
use crate::error::ApiError;
use crate::models::{CreatedCommit, Sha};
use crate::services::GitDataApi;

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub 客户端
pub struct GithubClient {
    http: Client,
    /// `<api_base_url>/<owner>/<repo>`
    repo_url: String,
    branch: String,
    directory: String,
}

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: RefObject,
}

#[derive(Debug, Deserialize)]
struct RefObject {
    sha: Sha,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    sha: Sha,
}

impl GithubClient {
    /// 创建新的 GitHub 客户端
    pub fn new(config: &GithubConfig) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .map_err(ApiError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(AUTHORIZATION, auth);
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            repo_url: format!(
                "{}/{}/{}",
                config.api_base_url.trim_end_matches('/'),
                config.owner,
                config.repo
            ),
            branch: config.branch.clone(),
            directory: config.directory.trim_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.repo_url, path)
    }

    fn head_ref_endpoint(&self) -> String {
        self.endpoint(&format!("git/refs/heads/{}", self.branch))
    }

    /// 文件在仓库中的路径
    fn file_path(&self, filename: &str) -> String {
        if self.directory.is_empty() {
            filename.to_string()
        } else {
            format!("{}/{}", self.directory, filename)
        }
    }

    fn tree_payload(&self, content: &str, filename: &str, base_tree: &Sha) -> Value {
        json!({
            "base_tree": base_tree,
            "tree": [{
                "path": self.file_path(filename),
                "mode": "100644",
                "type": "blob",
                "content": content,
            }]
        })
    }

    /// 发送请求并解析 JSON 响应
    async fn send<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> Result<T, ApiError> {
        debug!("请求 {}", endpoint);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Malformed {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl GitDataApi for GithubClient {
    async fn get_head_ref(&self) -> Result<Sha, ApiError> {
        let endpoint = self.head_ref_endpoint();
        let response: RefResponse = self.send(&endpoint, self.http.get(&endpoint)).await?;
        Ok(response.object.sha)
    }

    async fn create_tree(
        &self,
        content: &str,
        filename: &str,
        base_tree: &Sha,
    ) -> Result<Sha, ApiError> {
        let endpoint = self.endpoint("git/trees");
        let payload = self.tree_payload(content, filename, base_tree);
        let response: TreeResponse = self
            .send(&endpoint, self.http.post(&endpoint).json(&payload))
            .await?;
        Ok(response.sha)
    }

    async fn create_commit(
        &self,
        message: &str,
        tree: &Sha,
        parent: &Sha,
    ) -> Result<CreatedCommit, ApiError> {
        let endpoint = self.endpoint("git/commits");
        let payload = json!({
            "message": message,
            "tree": tree,
            "parents": [parent],
        });
        self.send(&endpoint, self.http.post(&endpoint).json(&payload))
            .await
    }

    async fn update_head_ref(&self, sha: &Sha) -> Result<(), ApiError> {
        let endpoint = self.head_ref_endpoint();
        let payload = json!({ "sha": sha, "force": false });
        let _: Value = self
            .send(&endpoint, self.http.patch(&endpoint).json(&payload))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(directory: &str) -> GithubConfig {
        GithubConfig {
            api_base_url: "https://api.github.com/repos/".to_string(),
            access_token: "ghp_token".to_string(),
            owner: "octocat".to_string(),
            repo: "solutions".to_string(),
            branch: "main".to_string(),
            directory: directory.to_string(),
        }
    }

    #[test]
    fn test_endpoints() {
        let client = GithubClient::new(&config("leetcode")).unwrap();
        assert_eq!(
            client.head_ref_endpoint(),
            "https://api.github.com/repos/octocat/solutions/git/refs/heads/main"
        );
        assert_eq!(
            client.endpoint("git/trees"),
            "https://api.github.com/repos/octocat/solutions/git/trees"
        );
    }

    #[test]
    fn test_file_path() {
        let nested = GithubClient::new(&config("leetcode/")).unwrap();
        assert_eq!(nested.file_path("1.Two-Sum.py"), "leetcode/1.Two-Sum.py");

        let root = GithubClient::new(&config("")).unwrap();
        assert_eq!(root.file_path("1.Two-Sum.py"), "1.Two-Sum.py");
    }

    #[test]
    fn test_tree_payload() {
        let client = GithubClient::new(&config("leetcode")).unwrap();
        let payload = client.tree_payload("code\n", "1.Two-Sum.py", &Sha::new("abc123"));
        assert_eq!(payload["base_tree"], "abc123");
        assert_eq!(payload["tree"][0]["path"], "leetcode/1.Two-Sum.py");
        assert_eq!(payload["tree"][0]["mode"], "100644");
        assert_eq!(payload["tree"][0]["type"], "blob");
        assert_eq!(payload["tree"][0]["content"], "code\n");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let mut bad = config("");
        bad.access_token = "line\nbreak".to_string();
        assert!(matches!(
            GithubClient::new(&bad),
            Err(ApiError::InvalidToken(_))
        ));
    }
}
