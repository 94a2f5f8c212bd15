mod submissions;

pub use submissions::{
    NewSubmission, RequestMetadata, Submission, SubmissionFilter, SubmissionStats,
};
