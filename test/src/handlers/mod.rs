//! Route handlers of the demo server.

pub mod auth;
pub mod home;
