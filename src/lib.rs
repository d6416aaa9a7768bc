//! Minimal HTTP backend: a static greeting and a database connectivity check.

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod logging;
pub mod signals;
pub mod state;
pub mod utils;
pub mod web;
