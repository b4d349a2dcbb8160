//! UI rendering module for the TUI application.
//!
//! This module provides the components, the main view that lays them out,
//! and the runtime that drives the event loop.

pub mod components;
pub mod main_component;
pub mod runtime;
