//! Shared configuration, error and domain types for ShipDesk.

pub mod config;
pub mod db;
pub mod error;
pub mod types;
