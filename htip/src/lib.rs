//! An HTIP agent.
//!
//! The agent announces the device information of an HTIP (TTC JJ-300.00)
//! node in LLDP frames, and decodes the frames other nodes announce. The
//! frame codec lives in [`frame`]; this crate drives it with an explicit
//! [`AgentConfig`] and talks to the link layer through the [`LinkInterface`]
//! and [`LinkSender`] traits.
//!
//! The periodic loop stays with the caller: call [`Agent::announce`] every
//! [`AgentConfig::interval`] and hand received frames to
//! [`Agent::receive`].
#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[macro_use]
pub(crate) mod utils;

pub use htip_frame as frame;

mod agent;
pub use agent::Agent;

mod config;
pub use config::AgentConfig;

mod iface;
pub use iface::{InterfaceFlags, LinkInterface, LinkSender};
