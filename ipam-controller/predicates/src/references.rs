use crate::Predicate;
use ipam_controller_k8s_api::{GroupKind, IPAddress, IPAddressClaim, Object, ReferencesPool};
use std::{fmt, marker::PhantomData};

/// Accepts objects of type `K` whose pool reference names the target group
/// and kind.
pub struct ReferencesPoolKind<K> {
    target: GroupKind,
    _kind: PhantomData<fn() -> K>,
}

/// Accepts `IPAddressClaim`s that reference a pool of the target kind.
pub type ClaimReferencesPoolKind = ReferencesPoolKind<IPAddressClaim>;

/// Accepts `IPAddress`es that reference a pool of the target kind.
pub type AddressReferencesPoolKind = ReferencesPoolKind<IPAddress>;

// === impl ReferencesPoolKind ===

impl<K: ReferencesPool> ReferencesPoolKind<K> {
    pub fn new(target: GroupKind) -> Self {
        Self {
            target,
            _kind: PhantomData,
        }
    }

    pub fn target(&self) -> &GroupKind {
        &self.target
    }
}

impl<K: ReferencesPool> Predicate for ReferencesPoolKind<K> {
    fn evaluate(&self, obj: &Object) -> bool {
        match K::narrow(obj) {
            Some(obj) => self.target.is_referenced_by(obj.pool_ref()),
            None => false,
        }
    }
}

impl<K> Clone for ReferencesPoolKind<K> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ReferencesPool> fmt::Debug for ReferencesPoolKind<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferencesPoolKind")
            .field("kind", &K::kind(&()))
            .field("target", &self.target)
            .finish()
    }
}
