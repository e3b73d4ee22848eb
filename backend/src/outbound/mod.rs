//! Outbound adapters implementing domain ports.
//!
//! - **memory**: the in-process store behind every repository port
//! - **credentials**: SHA-256 credential digests for development
//! - **notifier**: invitation delivery through the tracing pipeline
//!
//! Adapters translate between domain types and their backing mechanism and
//! hold no access rules of their own.

pub mod credentials;
pub mod memory;
pub mod notifier;
