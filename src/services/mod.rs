pub mod submission_ai;

pub use submission_ai::SubmissionAiService;
