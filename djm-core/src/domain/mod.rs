//! Core domain types
//!
//! Records mirrored from the scheduling service. The dashboard treats them as
//! opaque transfer objects: it displays and edits them but owns none of their
//! lifecycle.

pub mod job;
pub mod task;
