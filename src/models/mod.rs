pub mod commit;
pub mod language;
pub mod problem;

pub use commit::{CreatedCommit, Sha};
pub use language::LanguageSpec;
pub use problem::ProblemRecord;
