//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep import/bootstrap callers decoupled from storage details.

pub mod dataset_service;
