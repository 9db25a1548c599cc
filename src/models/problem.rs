use crate::models::language::{self, LanguageSpec};

/// 一道题及其通过的题解
///
/// 由抓取流程依次填充，上传后不再修改。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemRecord {
    pub title: String,
    pub url: String,
    pub solution_code: String,
    pub solution_language: String,
}

impl ProblemRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 题号，即标题中第一个 `.` 之前的部分
    pub fn identifier(&self) -> &str {
        self.title.split('.').next().unwrap_or_default().trim()
    }

    pub fn language_spec(&self) -> LanguageSpec {
        language::resolve(&self.solution_language)
    }

    /// 默认文件名：`1. Two Sum` + `Python3` → `1.Two-Sum.py`
    pub fn solution_filename(&self) -> String {
        let mut words = self.title.split_whitespace();
        let head = words.next().unwrap_or_default();
        let rest = words.collect::<Vec<_>>().join("-");
        format!("{}{}{}", head, rest, self.language_spec().extension)
    }

    /// 提交到仓库的文件内容
    pub fn file_content(&self) -> String {
        match self.language_spec().comment {
            Some(comment) => format!("{} {}\n\n{}\n", comment, self.url, self.solution_code),
            None => format!("{}\n", self.solution_code),
        }
    }
}
