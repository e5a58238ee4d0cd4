pub mod history;
pub mod lookup;
pub mod ticket;
pub mod user;

pub use history::{HistoryEntry, NewHistoryEntry};
pub use lookup::{Category, LookupEntry, Priority};
pub use ticket::{NewTicket, Ticket};
pub use user::{NewUser, User};
