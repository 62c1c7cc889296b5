//! Database entities.

pub mod love;
pub mod user;

pub use love::Entity as Love;
pub use user::Entity as User;
