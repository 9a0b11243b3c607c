//! Screen controllers and the state they expose to renderers.

pub mod details;
pub mod home;
pub mod item;
pub mod mvi;
pub mod navigation;
pub mod search;
