pub mod commit_pipeline;
pub mod prompt;
pub mod scraper;
pub mod url_parser;

pub use commit_pipeline::{upload_solution, GitDataApi};
pub use prompt::{AcceptDefaults, InquirePrompter, Prompter};
pub use scraper::{Scraper, SolutionDetails};
pub use url_parser::{validate_url, ProblemTarget, UrlParser};
