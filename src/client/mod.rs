//! Mentor client
//!
//! Wires an injected query executor to the listing and detail paths.

mod mentor_client;

pub use mentor_client::MentorClient;
