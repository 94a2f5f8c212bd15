mod submissions;

pub use submissions::{SqliteSubmissionRepo, SubmissionRepo};
