mod attendance;
pub mod client;
mod punch;
pub mod types;

pub use client::*;
pub use types::*;
