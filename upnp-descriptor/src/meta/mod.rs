//! Immutable service model
//!
//! Values here are only built through [`crate::staging`] or directly by
//! constructors. Ownership flows one way: a service owns its actions and state
//! variables, an action owns its arguments, and an argument refers to its state
//! variable by name only.

mod action;
mod argument;
mod service;
mod state_variable;

pub use action::Action;
pub use argument::{ActionArgument, Direction, UnknownDirection};
pub use service::{Service, SpecVersion};
pub use state_variable::{AllowedValueRange, StateVariable};
