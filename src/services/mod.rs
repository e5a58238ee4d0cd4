pub mod stores;
pub use stores::{HistoryStore, ReferenceStore, TicketStore};

pub mod identity_resolver;
pub use identity_resolver::{IdentityRequest, IdentityResolver, ResolvedIdentity};

pub mod ticket_service;
pub mod ticket_service_impl;
pub use ticket_service::{TicketError, TicketService};
pub use ticket_service_impl::DefaultTicketService;

pub mod history_service;
pub mod history_service_impl;
pub use history_service::{HistoryError, HistoryService};
pub use history_service_impl::DefaultHistoryService;

pub mod reference_service;
pub mod reference_service_impl;
pub use reference_service::{ReferenceError, ReferenceService};
pub use reference_service_impl::SeaOrmReferenceService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::SeaOrmUserService;
