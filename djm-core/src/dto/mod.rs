//! Data Transfer Objects for the scheduling API
//!
//! Request bodies sent by the dashboard and the response envelope every
//! endpoint wraps its payload in.

pub mod job;
pub mod response;
