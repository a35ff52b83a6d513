//! Shared test utilities for git-simulator
//!
//! This module provides deterministic repositories, scenario builders and output
//! predicates for the integration tests.

pub mod assertions;
pub mod fixtures;
pub mod repository;
