//! Command-line interface: argument parsing, handlers, rendering, review

pub mod commands;
pub mod handlers;
pub mod output;
pub mod review;
