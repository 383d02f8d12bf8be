#![warn(missing_docs)]
//! Slot containers and the click interaction engine.
//!
//! A [`Container`] is a fixed set of slots, each bound to a [`SlotPolicy`] and
//! a shift-click routing list. [`ClickEngine::handle_click`] applies one
//! client click to a container and the session's [`Cursor`].

mod click;
mod container;
mod cursor;
mod engine;
pub mod layouts;
mod policy;
mod shared;

pub use click::*;
pub use container::*;
pub use cursor::*;
pub use engine::*;
pub use policy::*;
pub use shared::*;
