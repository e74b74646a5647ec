pub use super::ad::Entity as Ad;
pub use super::user::Entity as User;
