//! Run-persistent bookkeeping for Lastlight: the points economy, night
//! grading, day objectives, and the progression/unlock tracker.
//!
//! Everything here is plain state plus pure functions; the sim crate
//! decides when these are invoked.

pub mod economy;
pub mod grading;
pub mod objective;
pub mod progression;
