//! Soapbox Core
//!
//! Domain logic for the soapbox opinion agent: the persona catalogue, the
//! agent profile, reply composition, and the conversation transcript. This
//! crate is deliberately synchronous and side-effect free; the session
//! runtime in `soapbox-agent` drives it.

pub mod persona;
pub mod profile;
pub mod reply;
pub mod transcript;
