pub use super::categories::Entity as Categories;
pub use super::priorities::Entity as Priorities;
pub use super::ticket_history::Entity as TicketHistory;
pub use super::tickets::Entity as Tickets;
pub use super::users::Entity as Users;
