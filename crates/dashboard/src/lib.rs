// crates/dashboard/src/lib.rs
//! Headless dashboard client for helm-view.
//!
//! Connects to the relay, runs the telemetry pipeline (decode → store →
//! alert), and keeps the client-side state the browser chrome would consume:
//! device records, motor slots, GPS trail, IO pin states, and the persisted
//! settings file. Rendering is someone else's job — this crate logs where a
//! browser would paint.

pub mod app;
pub mod client;
pub mod export;
pub mod settings;

pub use app::{Dashboard, DashboardEvent};
pub use settings::Settings;
