//! Timing helpers for the game side of a session.
//!
//! The capture core has no timers of its own. A game screen owns one of
//! these, advances it from its own tick source, and calls `stop()` on the
//! recorder when the countdown expires.

pub mod countdown;
pub mod phases;
