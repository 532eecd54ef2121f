//! Shared wire definitions for the Todo API.
//!
//! Every HTTP response body is an [`envelope::Envelope`]; the resource
//! payloads it carries are defined in [`task`] and [`label`].

pub mod auth;
pub mod envelope;
pub mod label;
pub mod task;
