#![no_std]

pub use htip::frame::Report;
pub use htip::{Agent, AgentConfig};
