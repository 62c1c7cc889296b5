//! Outbound HTTP gateways for muse.
//!
//! This crate carries the HTTP implementations of the remote service
//! traits defined in the core crate:
//!
//! - **Picture**: love counters, loved-picture listings, cascade retraction
//! - **Alarm**: love alarms and their lifecycle
//!
//! Both services are best-effort collaborators; callers decide whether
//! a failed call is fatal. The clients here only report it.

pub mod alarm;
pub mod client;
pub mod picture;

pub use alarm::HttpAlarmGateway;
pub use client::GatewayError;
pub use picture::HttpPictureGateway;
