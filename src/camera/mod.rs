//! Camera acquisition and permission state.
//!
//! The render pipeline only ever asks "is there a ready frame"; everything else here exists to
//! feed that answer and to produce user-facing messages when acquisition fails.

pub(crate) mod error;
pub(crate) mod permission;
pub(crate) mod stream;
