//! Wire-facing request and response payloads.

pub mod common;
pub mod detection;
pub mod game;
pub mod health;
