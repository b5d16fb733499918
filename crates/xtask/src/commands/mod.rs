//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod catalog;
mod check;
mod decode;
mod encode;
mod list;
mod show;

pub use check::Check;
pub use decode::Decode;
pub use encode::Encode;
pub use list::List;
pub use show::Show;
