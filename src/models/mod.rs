pub mod activity;
pub mod faculty;
pub mod routine;
pub mod swap;
pub mod user;

pub use activity::{
    CourseMaterial, HomeStats, NewMaterialRequest, NewReviewRequest, RecentActivity, Review,
    ScoredReview, ServiceStatus, UserStatCount, VoteOutcome, VoteRequest,
};
pub use faculty::{
    Faculty, FacultyDetail, FacultyInfo, FacultyLookupResponse, NewFacultyRequest,
    normalize_initial,
};
pub use routine::{
    ANONYMOUS_OWNER, MergedRoutine, NewMergedRoutineRequest, NewRoutineRequest, SavedRoutine,
    SharedMergedRoutine, SharedRoutine,
};
pub use swap::{
    AskedSection, NewSwapRequest, PublicSwapListing, REQUEST_ACCEPTED, REQUEST_PENDING,
    REQUEST_REJECTED, RequestInbox, SendSwapRequest, Swap, SwapListing, SwapRequest,
    UpdateSwapRequestBody, group_asked_sections,
};
pub use user::{DeletedUser, User};

use serde::Serialize;

/// Body returned by delete endpoints: the identifier of the removed row.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}
