//! Caches for the shell.

pub mod texture_cache;
