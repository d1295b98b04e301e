use etagger_core::config::EtagConfig;
use serde::Deserialize;

use crate::entity::Entity;

/// Per-call generation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Options {
    /// Explicit weak/strong choice. `None` defers to the entity: metadata
    /// tags are weak, content tags are strong.
    #[serde(default)]
    pub weak: Option<bool>,
}

impl Options {
    #[must_use]
    pub const fn weak() -> Self {
        Self { weak: Some(true) }
    }

    #[must_use]
    pub const fn strong() -> Self {
        Self { weak: Some(false) }
    }

    /// ## Summary
    /// Resolves whether the tag for `entity` gets the weak marker.
    #[must_use]
    pub fn resolve_weak(&self, entity: &Entity<'_>) -> bool {
        self.weak.unwrap_or_else(|| entity.is_metadata())
    }
}

impl From<&EtagConfig> for Options {
    fn from(config: &EtagConfig) -> Self {
        Self { weak: config.weak }
    }
}
