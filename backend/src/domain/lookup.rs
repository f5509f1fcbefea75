//! Small static lookup tables referenced by foreign key.

use std::fmt;

use super::LookupId;

/// Name of the verification status every new prediction starts in.
pub const PENDING_VERIFICATION: &str = "pending";
/// Verification status counted as a correct prediction.
pub const VERIFIED: &str = "verified";
/// Verification status counted as an incorrect prediction.
pub const DISPROVED: &str = "disproved";

/// Which lookup table a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Lifecycle label on a capsule.
    CapsuleStatus,
    /// Category of a capsule.
    CapsuleType,
    /// Lifecycle label on a prediction.
    VerificationStatus,
    /// Kind of payload held by capsule content.
    ContentType,
    /// Access level granted by an access control entry.
    PermissionLevel,
}

impl LookupKind {
    /// Human-readable label used in log lines and error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CapsuleStatus => "capsule status",
            Self::CapsuleType => "capsule type",
            Self::VerificationStatus => "verification status",
            Self::ContentType => "content type",
            Self::PermissionLevel => "permission level",
        }
    }

    /// Rows installed by the schema migration and the in-memory seed.
    #[must_use]
    pub const fn seed_names(self) -> &'static [&'static str] {
        match self {
            Self::CapsuleStatus => &["draft", "sealed", "opened"],
            Self::CapsuleType => &["personal", "public", "collaborative"],
            Self::VerificationStatus => &[PENDING_VERIFICATION, VERIFIED, DISPROVED],
            Self::ContentType => &["text", "image", "video", "audio"],
            Self::PermissionLevel => &["view", "edit", "owner"],
        }
    }

    /// Every lookup table.
    pub const ALL: [Self; 5] = [
        Self::CapsuleStatus,
        Self::CapsuleType,
        Self::VerificationStatus,
        Self::ContentType,
        Self::PermissionLevel,
    ];
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A `{id, name}` lookup row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// Row key.
    pub id: LookupId,
    /// Display name, unique in practice but not enforced.
    pub name: String,
}

impl Lookup {
    /// Build a lookup row.
    pub fn new(id: LookupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
