//! # Refine CLI Library
//!
//! Command definitions and handlers for the `refine` binary, a terminal
//! companion for Jira backlog refinement sessions.

pub mod cli;
pub mod clients;
pub mod completion;
