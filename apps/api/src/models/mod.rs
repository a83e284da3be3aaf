pub mod candidate;
pub mod job;

pub use candidate::CandidateProfile;
pub use job::JobPosting;
