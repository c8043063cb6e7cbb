pub mod badge;
mod handlers;
pub mod server;

pub use badge::BadgeStore;
pub use handlers::{AppState, CONTEXT_NOT_KNOWN};
