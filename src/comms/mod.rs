//! Front-end channels. Only the interactive console exists today.

pub mod console;

pub use console::{Console, Flow};
