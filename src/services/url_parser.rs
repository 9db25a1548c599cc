//! 题目 / 提交 URL 解析与校验

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::error::{AppError, AppResult, ConfigError};

/// 解析后的目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemTarget {
    /// `<base>problems/<slug>/`
    pub problem_url: String,
    /// `<base>problems/<slug>/submissions/<id>/`，只给了题目链接时为空
    pub submission_url: Option<String>,
}

/// 按站点 base URL 匹配题目与提交链接
#[derive(Debug, Clone)]
pub struct UrlParser {
    problem: Regex,
    submission: Regex,
}

impl UrlParser {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        let mut base = base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let problem = format!(r"{}problems/[\w-]+/", regex::escape(&base));
        let submission = format!(r"{}submissions/\d+/", problem);
        Ok(Self {
            problem: Regex::new(&format!("^{}", problem))?,
            submission: Regex::new(&format!("^{}", submission))?,
        })
    }

    /// 去掉 query / fragment 并补齐末尾 `/` 后匹配
    pub fn parse(&self, raw: &str) -> AppResult<ProblemTarget> {
        let mut url = Url::parse(raw.trim()).map_err(|_| AppError::invalid_url(raw, None))?;
        url.set_query(None);
        url.set_fragment(None);
        let mut normalized = url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        debug!("规范化 URL: {}", normalized);

        let problem_url = self
            .problem
            .find(&normalized)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| AppError::invalid_url(raw, None))?;
        let submission_url = self
            .submission
            .find(&normalized)
            .map(|m| m.as_str().to_string());

        Ok(ProblemTarget {
            problem_url,
            submission_url,
        })
    }
}

/// 确认 URL 可访问且状态码正常
pub async fn validate_url(http: &reqwest::Client, url: &str) -> AppResult<()> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::invalid_url(url, Some(e)))?;
    response
        .error_for_status()
        .map_err(|e| AppError::invalid_url(url, Some(e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> UrlParser {
        UrlParser::new("https://leetcode.com").unwrap()
    }

    #[test]
    fn test_problem_url() {
        let target = parser().parse("https://leetcode.com/problems/two-sum/").unwrap();
        assert_eq!(target.problem_url, "https://leetcode.com/problems/two-sum/");
        assert_eq!(target.submission_url, None);
    }

    #[test]
    fn test_problem_url_variants() {
        let parser = parser();
        for raw in [
            "https://leetcode.com/problems/two-sum",
            "https://leetcode.com/problems/two-sum/description/",
            "https://leetcode.com/problems/two-sum/?envType=daily-question#top",
        ] {
            let target = parser.parse(raw).unwrap();
            assert_eq!(target.problem_url, "https://leetcode.com/problems/two-sum/", "{}", raw);
            assert_eq!(target.submission_url, None, "{}", raw);
        }
    }

    #[test]
    fn test_submission_url() {
        let target = parser()
            .parse("https://leetcode.com/problems/two-sum/submissions/1234567/")
            .unwrap();
        assert_eq!(target.problem_url, "https://leetcode.com/problems/two-sum/");
        assert_eq!(
            target.submission_url.as_deref(),
            Some("https://leetcode.com/problems/two-sum/submissions/1234567/")
        );
    }

    #[test]
    fn test_submission_listing_is_not_a_submission() {
        let target = parser()
            .parse("https://leetcode.com/problems/two-sum/submissions/")
            .unwrap();
        assert_eq!(target.submission_url, None);
    }

    #[test]
    fn test_rejects_foreign_urls() {
        let parser = parser();
        for raw in [
            "not a url",
            "https://example.com/problems/two-sum/",
            "https://leetcode.com/contest/weekly-contest-1/",
            "https://leetcode.com/problems/",
        ] {
            let err = parser.parse(raw).unwrap_err();
            assert_eq!(err.to_string(), "Invalid problem url.", "{}", raw);
        }
    }

    #[test]
    fn test_base_url_is_escaped() {
        let parser = UrlParser::new("https://leetcode.cn/").unwrap();
        assert!(parser.parse("https://leetcodexcn/problems/two-sum/").is_err());
        assert!(parser.parse("https://leetcode.cn/problems/two-sum/").is_ok());
    }

    #[tokio::test]
    async fn test_validate_unreachable() {
        let http = reqwest::Client::new();
        let err = validate_url(&http, "http://127.0.0.1:9/problems/two-sum/")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl { source: Some(_), .. }));
    }
}
