pub mod solution_flow;

pub use solution_flow::{SolutionFlow, UploadOutcome};
