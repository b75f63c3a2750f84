//! # asp-session
//!
//! The client session for Aspirant Network: who is signed in, which exam's
//! content they are looking at, and whether a route may be entered.
//!
//! Authentication and exam selection share one [`Session`] over one
//! [`KeyValueStore`]. Every consumer receives the session explicitly; there
//! is no global instance.
//!
//! ```
//! use asp_session::{MemoryStore, Session};
//!
//! let session = Session::open(MemoryStore::new()).unwrap();
//! assert!(!session.is_authenticated());
//! ```

mod error;
mod exam;
pub mod guard;
mod onboarding;
mod session;
pub mod store;
pub mod token;

pub use error::{SessionError, StoreError};
pub use guard::{RouteDecision, RouteKind};
pub use onboarding::{LEVELS, OnboardingProfile};
pub use session::Session;
pub use store::{FileStore, KeyValueStore, KeyringStore, MemoryStore};
