//! Console Module - Terminal Dashboard
//!
//! Text rendering of the dashboard and the interactive controller loop.

pub mod app;
pub mod command;
pub mod render;


pub use app::{Console, ShowTiming};
