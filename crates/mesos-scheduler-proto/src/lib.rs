//! mesos-scheduler-proto: protocol messages for the Mesos v1 scheduler API.
//!
//! Hand-maintained `prost` structs mirroring the field numbers of
//! `mesos/v1/mesos.proto` and `mesos/v1/scheduler/scheduler.proto`.
//! Only the subset the scheduler client needs is modelled; unknown
//! fields are skipped on decode, so newer masters remain compatible.
//!
//! # Layout
//!
//! - **`mesos`** for identifiers, resources, offers, task/operation status
//! - **`scheduler`** for the `Call` and `Event` envelopes

pub mod mesos;
pub mod scheduler;

pub use mesos::*;
pub use scheduler::{call, event, Call, Event};

/// Re-exported so callers can encode/decode without a direct `prost` dependency.
pub use prost::Message;
