//! OPI App - composition root and services.
//!
//! Wires the backend client, the admin access controller, and the role
//! tracker into a single [`AppState`] owned by the embedding application
//! (there is deliberately no global session state; everything is passed
//! by reference from here). Two service layers sit on top:
//!
//! - [`services::AdminService`] - PIN login, the admin claim, and
//!   role-gated case/content management
//! - [`services::CaseService`] - the public site's case submission and
//!   lookup operations (no gating)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod services;
pub mod state;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use services::{AdminService, CaseService, ServiceError};
pub use state::AppState;
