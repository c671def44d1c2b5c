// crates/telemetry/src/lib.rs
//! Telemetry decoding and per-device state for the helm-view dashboard.
//!
//! This crate is the consuming end of the relay's fan-out: it turns the loose
//! text sub-protocol carried in chat envelopes into typed events
//! ([`decode::decode`]), folds them into per-device rolling state
//! ([`store::DeviceStore`], [`motor::MotorStore`]), and derives alert severity
//! and staleness ([`alert`]). Pure logic — no sockets, no clocks of its own;
//! callers pass timestamps in so every transition is testable.

pub mod alert;
pub mod command;
pub mod decode;
pub mod descriptor;
pub mod motor;
pub mod store;

pub use alert::{severity, should_sound, Severity};
pub use decode::{decode, SwitchState, TelemetryEvent};
pub use descriptor::DeviceDescriptor;
pub use motor::MotorStore;
pub use store::DeviceStore;
