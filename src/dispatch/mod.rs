//! Control and monitor dispatch
//!
//! Control commands share one code path: a per-event [`CommandDescriptor`]
//! names the required fields, their validation rules and the status side
//! effects, and [`ControlDispatcher`] interprets it. Monitor queries are
//! handled read-only by [`MonitorDispatcher`].

pub mod control;
pub mod descriptor;
pub mod monitor;
pub mod validate;

pub use control::ControlDispatcher;
pub use descriptor::{CommandDescriptor, StatusEffect, lookup};
pub use monitor::MonitorDispatcher;
pub use validate::FieldRule;
