//! Host-independent showcase behaviour: rendering into mount points,
//! the column entrance animation and the slider dot controller.

pub mod animator;
pub mod bootstrap;
pub mod mount;
pub mod render;
pub mod scheduler;
pub mod slider;

pub use bootstrap::{PageMounts, Showcase};
pub use scheduler::GlibScheduler;
