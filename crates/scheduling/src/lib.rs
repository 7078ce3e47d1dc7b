//! MentorLink scheduling client for Rust
//!
//! This crate manages the session lifecycle: fetching the today/upcoming
//! session lists, and sending reminders, rescheduling and cancelling against
//! the remote scheduling service. Local state is only mutated after the
//! remote operation has succeeded; a failed call leaves the store exactly as
//! it was.

mod client;
mod coordinator;
mod error;
mod session;
mod store;

pub use client::SchedulingClient;
pub use coordinator::{ActionCoordinator, PendingConfirmation, SessionAction};
pub use error::{Result, SchedulingError};
pub use session::{Participant, Session, SessionType};
pub use store::SessionStore;
