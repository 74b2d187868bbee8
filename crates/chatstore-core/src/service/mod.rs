//! Domain services.
//!
//! Services apply input rules and defaults, then delegate persistence to the
//! repository traits. They are generic over those traits so this crate
//! never depends on chatstore-infra.

pub mod message;
pub mod session;

#[cfg(test)]
pub(crate) mod memory;

use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to the microsecond precision the store keeps.
///
/// Returning the same precision the database round-trips means a freshly
/// created record compares equal to the one read back.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
