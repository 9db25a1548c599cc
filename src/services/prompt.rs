//! 交互式输入

use inquire::Text;

use crate::error::AppResult;

/// 向用户询问一个值，带默认值
pub trait Prompter {
    fn input(&self, message: &str, default: &str) -> AppResult<String>;
}

/// 终端交互
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn input(&self, message: &str, default: &str) -> AppResult<String> {
        let answer = Text::new(message).with_default(default).prompt()?;
        Ok(answer)
    }
}

/// 非交互模式，直接采用默认值
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn input(&self, _message: &str, default: &str) -> AppResult<String> {
        Ok(default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_defaults() {
        let answer = AcceptDefaults.input("Solution file name:", "1.Two-Sum.py").unwrap();
        assert_eq!(answer, "1.Two-Sum.py");
    }
}
