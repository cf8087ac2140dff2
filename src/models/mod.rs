//! Data models for the parish content management system.
//!
//! All wire-facing structs serialize to camelCase to match the admin panel
//! and public site clients.

mod activity;
mod admin;
mod article;
mod audio_message;
mod author;
mod category;
mod coordinator;
mod memory;
mod message;
mod pastor;

pub use activity::*;
pub use admin::*;
pub use article::*;
pub use audio_message::*;
pub use author::*;
pub use category::*;
pub use coordinator::*;
pub use memory::*;
pub use message::*;
pub use pastor::*;
