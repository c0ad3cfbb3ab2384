//! Store backends and connection management.

pub mod config;
pub mod connection;
pub mod memory;
pub mod mongo;
