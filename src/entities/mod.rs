pub mod prelude;

pub mod categories;
pub mod priorities;
pub mod ticket_history;
pub mod tickets;
pub mod users;
