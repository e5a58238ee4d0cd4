pub mod category;
pub mod history;
pub mod priority;
pub mod ticket;
pub mod user;
