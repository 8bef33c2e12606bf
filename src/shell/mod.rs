//! Interactive terminal shell
//!
//! Collects a contract from the user and runs the analysis menu against it.
//! All user-facing messages live here; the pricing functions never print.

pub mod format;
pub mod menu;
pub mod session;

pub use format::*;
pub use menu::*;
pub use session::*;
