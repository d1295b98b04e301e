//! HTTP entity tag generation.
//!
//! ## Summary
//! Computes `ETag` values either from in-memory content (text or bytes), via a
//! truncated base64 SHA-1 digest, or from a resource's size and modification
//! time. Content tags are strong by default; metadata tags are weak by default.
//! Nothing here performs I/O.

mod entity;
mod generate;
mod options;


pub use entity::{Entity, Stat};
pub use etagger_core::config::{EtagConfig, Settings, load_config};
pub use etagger_core::error::{CoreError, CoreResult};
pub use generate::{entity_tag, generate, generate_default, generate_value, stat_tag};
pub use options::Options;
