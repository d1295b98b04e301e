//! `ETag` generation functions.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use etagger_core::constants::{DIGEST_TRUNCATE_LEN, EMPTY_ENTITY_DIGEST, WEAK_PREFIX};
use etagger_core::error::CoreResult;
use serde_json::Value;
use sha1::{Digest, Sha1};

use crate::entity::{Entity, Stat};
use crate::options::Options;

/// ## Summary
/// Generates an `ETag` for `entity`.
///
/// Text and binary content are tagged `"<len-hex>-<digest>"`, metadata is
/// tagged `"<size-hex>-<mtime-ms-hex>"`. The result is prefixed with `W/` when
/// the resolved options make it weak.
#[must_use]
pub fn generate<'a>(entity: impl Into<Entity<'a>>, options: &Options) -> String {
    let entity = entity.into();
    let weak = options.resolve_weak(&entity);

    let tag = match &entity {
        Entity::Metadata(stat) => stat_tag(stat),
        Entity::Text(text) => entity_tag(text.as_bytes()),
        Entity::Binary(bytes) => entity_tag(bytes),
    };

    tracing::trace!(kind = entity.kind(), weak, "Generated entity tag");

    if weak { format!("{WEAK_PREFIX}{tag}") } else { tag }
}

/// ## Summary
/// Generates an `ETag` with default options.
#[must_use]
pub fn generate_default<'a>(entity: impl Into<Entity<'a>>) -> String {
    generate(entity, &Options::default())
}

/// ## Summary
/// Classifies an untyped value and generates its `ETag`.
///
/// ## Errors
/// Returns `InvalidArgument` if `value` is not a string, a byte array, or a
/// metadata record.
pub fn generate_value(value: &Value, options: &Options) -> CoreResult<String> {
    let entity = Entity::try_from(value).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected entity");
    })?;

    Ok(generate(entity, options))
}

/// ## Summary
/// Quoted validator for resource metadata, without the weak marker.
#[must_use]
pub fn stat_tag(stat: &Stat) -> String {
    format!("\"{:x}-{}\"", stat.size, signed_hex(stat.modified_millis()))
}

/// ## Summary
/// Quoted validator for content bytes, without the weak marker.
#[must_use]
pub fn entity_tag(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return format!("\"0-{EMPTY_ENTITY_DIGEST}\"");
    }

    format!("\"{:x}-{}\"", bytes.len(), content_digest(bytes))
}

pub(crate) fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    let hash = hasher.finalize();

    let mut encoded = STANDARD.encode(hash);
    encoded.truncate(DIGEST_TRUNCATE_LEN);
    encoded
}

// Pre-epoch times keep their sign.
pub(crate) fn signed_hex(value: i64) -> String {
    if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{value:x}")
    }
}
