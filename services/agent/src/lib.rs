//! Soapbox Agent Runtime
//!
//! This library contains the session runtime for the soapbox opinion agent:
//! runtime configuration, the session event model, the speech adapter seams
//! with their simulated implementations, and the session controller itself.
//! The `soapbox` binary is a thin console front end around it.

pub mod config;
pub mod event;
pub mod session;
pub mod speech;
