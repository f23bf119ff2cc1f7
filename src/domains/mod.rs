//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently exposes a single domain: tools backed by the INSW
//! commodity API.

pub mod tools;
