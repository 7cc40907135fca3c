//! Data Transfer Objects for the evaluation service API
//!
//! Wire representations of requests and responses. Domain types are
//! embedded directly where the wire shape matches them.

pub mod run;
