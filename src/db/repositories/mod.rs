mod assessment_repository;
mod assignment_repository;
mod class_repository;
mod class_request_repository;
mod content_repository;
mod enrollment_repository;
mod session_repository;
mod user_repository;

pub use assessment_repository::{AssessmentRepository, ScoredResult};
pub use assignment_repository::AssignmentRepository;
pub use class_repository::ClassRepository;
pub use class_request_repository::ClassRequestRepository;
pub use content_repository::ContentRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;
