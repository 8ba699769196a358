//! Clients for third-party services outside the completion endpoint.

pub mod pexels;
