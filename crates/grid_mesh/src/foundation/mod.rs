//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types shared by the mesh generator and its callers
//! - Logging utilities

pub mod math;
pub mod logging;
