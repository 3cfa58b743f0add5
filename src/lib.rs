//! Terminal exam-preparation explorer. The binary in main.rs is a thin
//! terminal shell; everything it drives lives here so integration tests
//! and benchmarks can reach it.

pub mod app;
pub mod config;
pub mod content;
pub mod event;
pub mod logging;
pub mod session;
pub mod ui;
