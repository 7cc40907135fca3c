//! Simrun Core
//!
//! Core types shared by the simrun client and the CI step binary.
//!
//! This crate contains:
//! - Domain types: run status, run snapshots, job handles and verdicts
//! - DTOs: request/response bodies exchanged with the evaluation service

pub mod domain;
pub mod dto;
