pub mod prelude;

pub mod agent_user;
pub mod favorite;
pub mod inquiry;
pub mod listing;
