pub mod beat_repo;
pub mod license_repo;
pub mod payment_event_repo;
pub mod session_repo;
pub mod user_repo;

pub use beat_repo::BeatRepo;
pub use license_repo::LicenseRepo;
pub use payment_event_repo::PaymentEventRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
