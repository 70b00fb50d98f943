//! Utility modules

pub mod slug;
pub mod time;
pub mod validation;
