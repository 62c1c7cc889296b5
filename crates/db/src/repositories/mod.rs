//! Repositories for database access.

pub mod love;
pub mod user;

pub use love::LoveRepository;
pub use user::UserRepository;
