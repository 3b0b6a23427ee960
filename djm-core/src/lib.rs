//! Distributed Job Manager Core
//!
//! Types and client-side logic for the job manager dashboard.
//!
//! This crate contains:
//! - Domain types: records mirrored from the scheduling service (Job, Task)
//! - DTOs: request bodies and response envelopes
//! - Forms: validation turning user input into requests
//! - Tables: sorting, filtering and pagination of fetched rows
//! - Routes: mapping dashboard URLs to pages

pub mod domain;
pub mod dto;
pub mod form;
pub mod payload;
pub mod route;
pub mod table;
