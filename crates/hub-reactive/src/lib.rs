//! Reactive primitives for the Policy Hub client.
//!
//! This crate provides:
//! - `Debounced` - A value that settles only after its input is quiet
//! - `AsyncData` - Dependency-driven fetching with a shared cache, where only
//!   the most recent call may commit its result
//!
//! Both run their timers and producers as tokio tasks and publish state over
//! `tokio::sync::watch`, so constructors must be called within a runtime.

mod async_data;
mod debounce;

pub use async_data::*;
pub use debounce::*;
