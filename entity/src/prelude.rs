pub use super::agent_user::Entity as AgentUser;
pub use super::favorite::Entity as Favorite;
pub use super::inquiry::Entity as Inquiry;
pub use super::listing::Entity as Listing;
