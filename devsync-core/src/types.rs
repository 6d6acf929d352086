//! Domain types for dev-mode sync configuration.
//!
//! Config-facing types deserialize from camelCase YAML (the external
//! configuration surface); unknown `mode` strings are a deserialization
//! error, never a runtime fallback.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Built-in excludes
// ---------------------------------------------------------------------------

/// Glob patterns excluded from every sync session. Always prepended to the
/// merged ignore list; user configuration cannot override or remove them.
pub const BUILTIN_EXCLUDES: &[&str] = &["/**/*.git", "**/*.devsync"];

// ---------------------------------------------------------------------------
// SyncMode
// ---------------------------------------------------------------------------

/// Direction and conflict policy of a sync session.
///
/// `one-way` and `two-way` are accepted as aliases of their safe variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncMode {
    #[serde(alias = "one-way")]
    OneWaySafe,
    OneWayReplica,
    OneWayReverse,
    OneWayReplicaReverse,
    #[serde(alias = "two-way")]
    TwoWaySafe,
    TwoWayResolved,
}

impl SyncMode {
    /// Every canonical mode, in declaration order.
    pub fn all() -> &'static [SyncMode] {
        &[
            SyncMode::OneWaySafe,
            SyncMode::OneWayReplica,
            SyncMode::OneWayReverse,
            SyncMode::OneWayReplicaReverse,
            SyncMode::TwoWaySafe,
            SyncMode::TwoWayResolved,
        ]
    }

    /// Reverse modes make the remote endpoint authoritative: the session's
    /// alpha side is the remote destination and beta is the local path.
    pub fn is_reverse(self) -> bool {
        matches!(
            self,
            SyncMode::OneWayReverse | SyncMode::OneWayReplicaReverse
        )
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncMode::OneWaySafe => "one-way-safe",
            SyncMode::OneWayReplica => "one-way-replica",
            SyncMode::OneWayReverse => "one-way-reverse",
            SyncMode::OneWayReplicaReverse => "one-way-replica-reverse",
            SyncMode::TwoWaySafe => "two-way-safe",
            SyncMode::TwoWayResolved => "two-way-resolved",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Override<T>
// ---------------------------------------------------------------------------

/// A per-path override field that distinguishes "the user said nothing"
/// from an explicitly chosen value (including zero).
///
/// Absent or `null` in YAML deserializes to [`Override::Inherit`]; any
/// present value deserializes to [`Override::Explicit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override<T> {
    /// Fall through to the provider/module-level default.
    Inherit,
    /// Explicit per-path value; always wins over a default.
    Explicit(T),
}

// Manual impl: a derive would require `T: Default`, which `OwnerId` is not.
impl<T> Default for Override<T> {
    fn default() -> Self {
        Override::Inherit
    }
}

impl<T> Override<T> {
    /// Resolve against a default: explicit value wins, else the default,
    /// else `None` (meaning: let the sync engine use its own default).
    pub fn resolve(&self, default: Option<T>) -> Option<T>
    where
        T: Clone,
    {
        match self {
            Override::Explicit(v) => Some(v.clone()),
            Override::Inherit => default,
        }
    }

    pub fn is_inherit(&self) -> bool {
        matches!(self, Override::Inherit)
    }
}

impl<T: Serialize> Serialize for Override<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Override::Inherit => serializer.serialize_none(),
            Override::Explicit(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Override<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Override::Explicit(v),
            None => Override::Inherit,
        })
    }
}

// ---------------------------------------------------------------------------
// OwnerId
// ---------------------------------------------------------------------------

/// File owner or group: numeric id or symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnerId {
    Id(u32),
    Name(String),
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerId::Id(id) => id.fmt(f),
            OwnerId::Name(name) => name.fmt(f),
        }
    }
}

// ---------------------------------------------------------------------------
// Sync spec + defaults
// ---------------------------------------------------------------------------

/// One sync rule: a local source path kept in sync with a path inside the
/// target container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPathSpec {
    /// Local-side path, relative to the module root.
    pub source: String,
    /// Absolute path inside the container.
    pub target: String,
    pub mode: SyncMode,
    /// Additional glob patterns to exclude, appended after the defaults.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    #[serde(default, skip_serializing_if = "Override::is_inherit")]
    pub default_file_mode: Override<u32>,
    #[serde(default, skip_serializing_if = "Override::is_inherit")]
    pub default_directory_mode: Override<u32>,
    #[serde(default, skip_serializing_if = "Override::is_inherit")]
    pub default_owner: Override<OwnerId>,
    #[serde(default, skip_serializing_if = "Override::is_inherit")]
    pub default_group: Override<OwnerId>,
}

/// Provider/module-scoped defaults applied to every sync rule that does not
/// override them. Never itself synchronized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DevModeDefaults {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_mode: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_mode: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<OwnerId>,
}

/// The per-module dev-mode block: optional command/args overrides for the
/// main container plus the list of sync rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DevModeSpec {
    /// Replaces the main container's command entirely when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Replaces the main container's args entirely when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sync: Vec<SyncPathSpec>,
}

// ---------------------------------------------------------------------------
// ResolvedSyncConfig
// ---------------------------------------------------------------------------

/// Fully merged, engine-ready sync configuration.
///
/// Invariant: for reverse modes `alpha` is the remote destination and
/// `beta` the local path; for all other modes the assignment is flipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSyncConfig {
    pub alpha: String,
    pub beta: String,
    pub mode: SyncMode,
    /// Built-in excludes, then defaults, then per-path excludes. Order
    /// preserved, duplicates not pruned.
    pub ignore: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_file_mode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_directory_mode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<OwnerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_group: Option<OwnerId>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
