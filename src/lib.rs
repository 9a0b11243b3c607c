//! Inventory tracking: item storage, screen state controllers, and a
//! text front end.

pub mod config;
pub mod data;
pub mod logging;
pub mod search;
pub mod shell;
pub mod ui;
