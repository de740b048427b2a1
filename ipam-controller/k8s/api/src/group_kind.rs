use crate::TypedLocalObjectReference;
use std::{fmt, str::FromStr, sync::Arc};

/// Identifies a kind of pool resource by its API group and kind.
///
/// Both parts are non-empty. The canonical text form is `Kind.group`, e.g.
/// `InClusterIPPool.ipam.cluster.x-k8s.io`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKind {
    group: Arc<str>,
    kind: Arc<str>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidGroupKind {
    #[error("group must not be empty")]
    EmptyGroup,

    #[error("kind must not be empty")]
    EmptyKind,

    #[error("{0:?} must be qualified by a group, e.g. Kind.example.com")]
    MissingGroup(String),
}

// === impl GroupKind ===

impl GroupKind {
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Result<Self, InvalidGroupKind> {
        let group = group.into();
        let kind = kind.into();
        if group.is_empty() {
            return Err(InvalidGroupKind::EmptyGroup);
        }
        if kind.is_empty() {
            return Err(InvalidGroupKind::EmptyKind);
        }
        Ok(Self {
            group: group.into(),
            kind: kind.into(),
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Checks whether `reference` names this exact group and kind.
    ///
    /// Comparisons are case-sensitive, and a reference without a group never
    /// matches.
    pub fn is_referenced_by(&self, reference: &TypedLocalObjectReference) -> bool {
        reference.kind == *self.kind && reference.api_group.as_deref() == Some(&*self.group)
    }
}

impl FromStr for GroupKind {
    type Err = InvalidGroupKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((kind, group)) => Self::new(group, kind),
            None if s.is_empty() => Err(InvalidGroupKind::EmptyKind),
            None => Err(InvalidGroupKind::MissingGroup(s.to_string())),
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.group)
    }
}
