mod init;
mod status;
mod tickets;

pub use init::cmd_init;
pub use status::cmd_status;
pub use tickets::cmd_list_tickets;
