//! Route handlers for the design-tools API.
//!
//! Each module owns one resource family and exposes a `router()`
//! merged in [`crate::app`]. Everything here sits behind the session
//! middleware except [`sessions::public_router`], which is how a
//! session comes to exist.

pub mod access_log;
pub mod catalogue;
pub mod inspector;
pub mod issuer;
pub mod proof_templates;
pub mod publish;
pub mod sessions;
