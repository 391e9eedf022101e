pub mod error;
pub mod local_client;
pub mod service;

pub use error::DomainError;
pub use local_client::TodoSharingLocalClient;
pub use service::{AppServices, ContactService, ProfileService, TodoService};
