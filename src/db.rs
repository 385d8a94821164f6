pub mod user_repo;
pub use user_repo::UserRepository;
pub mod profile_repo;
pub use profile_repo::ProfileRepository;
pub mod booking_repo;
pub use booking_repo::BookingRepository;
pub mod catalog_repo;
pub use catalog_repo::{AdventureRepository, AgencyRepository};
