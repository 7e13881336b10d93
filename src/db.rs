pub mod applicant_repo;
pub use applicant_repo::ApplicantRepository;
pub mod application_repo;
pub use application_repo::ApplicationRepository;
pub mod audit_repo;
pub use audit_repo::AuditRepository;
pub mod license_repo;
pub use license_repo::LicenseRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
