//! Inkboard Application
//!
//! Headless host for the drawing engine: loads configuration and scenes,
//! replays scripted input, schedules redraws and writes exports to disk.

mod error;
pub mod file_ops;
mod script;
mod session;

pub use error::AppError;
pub use script::ScriptStep;
pub use session::Session;
