//! Public binding API surface.
//!
//! This module gathers the types a scripting layer interacts with, so the
//! registry itself can stay focused on template storage.

pub mod bindings;

pub use bindings::{AugmentBindings, AugmentHandle, InitialModifiers};
