//! Display projections over library state.
//!
//! Pure functions; results depend only on their arguments and are recomputed
//! on every call.

pub mod projection;
