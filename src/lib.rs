//! Core library for the `volley` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, configuration parsing, timed request execution, the
//! volley engine, metrics aggregation, and report formatting. The primary
//! user-facing interface is the `volley` command-line application; library
//! APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
