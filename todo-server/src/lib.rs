//! Todo API server library.
//!
//! Exposes the HTTP server for use in tests and embedding. Every resource
//! route is gated by an [`auth::AccessGuard`] and answers with a
//! [`todo_proto::envelope::Envelope`].

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod labels;
pub mod server;
pub mod store;
pub mod tasks;
