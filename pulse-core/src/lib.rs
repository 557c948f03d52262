//! Pulse Core
//!
//! Core types and abstractions for the Pulse CI dashboard backend.
//!
//! This crate contains:
//! - Domain types: Core business entities (Project, Pipeline, Job, etc.)
//! - DTOs: Data transfer objects for the HTTP API and webhook ingestion

pub mod domain;
pub mod dto;
