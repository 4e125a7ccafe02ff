//! The `utils` module provides the definitions shared across `topichub`:
//! the hub error type and logging setup.

pub mod error;
pub mod logging;
