//! HTTP surface: decision endpoint plus probe endpoints
//!
//! This layer is the cookie-transport collaborator: it reads the two
//! tracking cookies from requests and writes them back on responses; the
//! domain core only ever sees plain value strings.

pub mod cookies;
pub mod error;
pub mod health;
pub mod router;
pub mod state;
pub mod v1;

pub use router::create_router;
pub use state::AppState;
