pub mod docker;
pub mod engine;
pub mod health;
pub mod local;

pub use crate::domain::model::{CommandOutput, CommandSpec, LaunchReport, StepStatus};
pub use crate::domain::ports::{CommandRunner, Launcher, PathLayout};
pub use crate::utils::error::Result;
