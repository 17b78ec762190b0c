//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod dashboard_repo;
pub mod document_repo;
pub mod idempotency_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod program_repo;
pub mod review_repo;
pub mod university_repo;

pub use application_repo::ApplicationRepo;
pub use dashboard_repo::DashboardRepo;
pub use document_repo::DocumentRepo;
pub use idempotency_repo::IdempotencyRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use program_repo::ProgramRepo;
pub use review_repo::ReviewRepo;
pub use university_repo::UniversityRepo;
