pub mod audit_log;
pub mod place;
pub mod suggestion;
pub mod user;
pub mod vote;

pub use place::Entity as Place;
pub use suggestion::Entity as Suggestion;
pub use user::Entity as User;
pub use vote::Entity as Vote;
