//! Facade contest server library.
//!
//! Shop photo uploads, AI facade and interior design generation with a local
//! fallback, contest submissions and social share links.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
