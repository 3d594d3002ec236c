pub mod accounts;
pub mod donations;
pub mod manager;
pub mod models;
pub mod requests;
pub mod sessions;

pub use accounts::AccountRepository;
pub use manager::DatabaseManager;
pub use donations::DonationRepository;
pub use requests::RequestRepository;
pub use sessions::SessionRepository;
