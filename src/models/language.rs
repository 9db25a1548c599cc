//! 语言 → 扩展名 / 注释符号 对照表

use phf::phf_map;
use tracing::warn;

/// 单个语言的文件信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSpec {
    /// 带点的扩展名，例如 `.py`
    pub extension: &'static str,
    /// 单行注释符号，没有则不写来源注释
    pub comment: Option<&'static str>,
}

impl LanguageSpec {
    const fn new(extension: &'static str, comment: &'static str) -> Self {
        Self {
            extension,
            comment: Some(comment),
        }
    }

    /// 未识别语言时的降级值
    pub const UNKNOWN: LanguageSpec = LanguageSpec {
        extension: "",
        comment: None,
    };
}

/// 键为站点上显示的语言名
static LANGUAGES: phf::Map<&'static str, LanguageSpec> = phf_map! {
    "C" => LanguageSpec::new(".c", "//"),
    "C++" => LanguageSpec::new(".cpp", "//"),
    "C#" => LanguageSpec::new(".cs", "//"),
    "Java" => LanguageSpec::new(".java", "//"),
    "Python" => LanguageSpec::new(".py", "#"),
    "Python3" => LanguageSpec::new(".py", "#"),
    "JavaScript" => LanguageSpec::new(".js", "//"),
    "TypeScript" => LanguageSpec::new(".ts", "//"),
    "PHP" => LanguageSpec::new(".php", "//"),
    "Swift" => LanguageSpec::new(".swift", "//"),
    "Kotlin" => LanguageSpec::new(".kt", "//"),
    "Dart" => LanguageSpec::new(".dart", "//"),
    "Go" => LanguageSpec::new(".go", "//"),
    "Ruby" => LanguageSpec::new(".rb", "#"),
    "Scala" => LanguageSpec::new(".scala", "//"),
    "Rust" => LanguageSpec::new(".rs", "//"),
    "Racket" => LanguageSpec::new(".rkt", ";"),
    "Erlang" => LanguageSpec::new(".erl", "%"),
    "Elixir" => LanguageSpec::new(".ex", "#"),
    "Bash" => LanguageSpec::new(".sh", "#"),
    "MySQL" => LanguageSpec::new(".sql", "--"),
    "MS SQL Server" => LanguageSpec::new(".sql", "--"),
    "Oracle" => LanguageSpec::new(".sql", "--"),
    "PostgreSQL" => LanguageSpec::new(".sql", "--"),
    "Pandas" => LanguageSpec::new(".py", "#"),
};

/// 精确查找
pub fn lookup(name: &str) -> Option<&'static LanguageSpec> {
    LANGUAGES.get(name.trim())
}

/// 查找语言，未识别时降级为空扩展名且不写注释
pub fn resolve(name: &str) -> LanguageSpec {
    match lookup(name) {
        Some(spec) => *spec,
        None => {
            warn!("⚠️ 未识别的语言 '{}'，文件将没有扩展名", name);
            LanguageSpec::UNKNOWN
        }
    }
}
