//! Process-wide registries for the OAuth flow.
//!
//! Both managers are plain in-memory maps owned by the server state and
//! shared behind `Arc<tokio::sync::Mutex<..>>`. They are deliberately
//! single-node: entries live for the lifetime of the process and are lost
//! on restart.

mod session;
mod state;

pub use session::Session;
pub use session::SessionManager;
pub use state::OauthStateManager;
pub use state::STATE_TTL_SECS;
