//! Concrete repositories, one per table.

pub mod asset;
pub mod session;
pub mod user;

pub use asset::AssetRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
