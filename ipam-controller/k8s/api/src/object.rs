use crate::{
    ipam::{IPAddress, IPAddressClaim},
    DynamicObject, TypeMeta, TypedLocalObjectReference,
};
use kube::Resource;
use serde::de::DeserializeOwned;
use tracing::debug;

/// An object delivered by a watch, narrowed to one of the resource types that
/// reference a pool.
#[derive(Clone, Debug)]
pub enum Object {
    Claim(IPAddressClaim),
    Address(IPAddress),
    Other(DynamicObject),
}

/// A resource type that carries a reference to the pool it draws from.
pub trait ReferencesPool: Resource<DynamicType = ()> {
    fn pool_ref(&self) -> &TypedLocalObjectReference;

    /// Returns the object as this type, if it is one.
    fn narrow(obj: &Object) -> Option<&Self>;
}

// === impl Object ===

impl Object {
    /// Decodes an untyped object.
    ///
    /// Objects whose `apiVersion` and `kind` match a known type are decoded
    /// into that type. Everything else, including objects that fail to
    /// decode, is returned as [`Object::Other`].
    pub fn from_dynamic(obj: DynamicObject) -> Self {
        let types = match obj.types.as_ref() {
            Some(types) => types,
            None => return Self::Other(obj),
        };

        if is_type::<IPAddressClaim>(types) {
            return match decode(&obj) {
                Ok(claim) => Self::Claim(claim),
                Err(error) => {
                    debug!(%error, name = ?obj.metadata.name, "Failed to decode IPAddressClaim");
                    Self::Other(obj)
                }
            };
        }

        if is_type::<IPAddress>(types) {
            return match decode(&obj) {
                Ok(addr) => Self::Address(addr),
                Err(error) => {
                    debug!(%error, name = ?obj.metadata.name, "Failed to decode IPAddress");
                    Self::Other(obj)
                }
            };
        }

        Self::Other(obj)
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Claim(_) => "IPAddressClaim",
            Self::Address(_) => "IPAddress",
            Self::Other(obj) => obj.types.as_ref().map(|t| t.kind.as_str()).unwrap_or(""),
        }
    }
}

impl From<IPAddressClaim> for Object {
    fn from(claim: IPAddressClaim) -> Self {
        Self::Claim(claim)
    }
}

impl From<IPAddress> for Object {
    fn from(addr: IPAddress) -> Self {
        Self::Address(addr)
    }
}

impl From<DynamicObject> for Object {
    fn from(obj: DynamicObject) -> Self {
        Self::from_dynamic(obj)
    }
}

// === impl ReferencesPool ===

impl ReferencesPool for IPAddressClaim {
    fn pool_ref(&self) -> &TypedLocalObjectReference {
        &self.spec.pool_ref
    }

    fn narrow(obj: &Object) -> Option<&Self> {
        match obj {
            Object::Claim(claim) => Some(claim),
            _ => None,
        }
    }
}

impl ReferencesPool for IPAddress {
    fn pool_ref(&self) -> &TypedLocalObjectReference {
        &self.spec.pool_ref
    }

    fn narrow(obj: &Object) -> Option<&Self> {
        match obj {
            Object::Address(addr) => Some(addr),
            _ => None,
        }
    }
}

fn is_type<K: Resource<DynamicType = ()>>(types: &TypeMeta) -> bool {
    types.api_version == K::api_version(&()) && types.kind == K::kind(&())
}

fn decode<K: DeserializeOwned>(obj: &DynamicObject) -> serde_json::Result<K> {
    serde_json::to_value(obj).and_then(serde_json::from_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mk_dynamic(api_version: &str, kind: &str, spec: serde_json::Value) -> DynamicObject {
        serde_json::from_value(json!({
            "apiVersion": api_version,
            "kind": kind,
            "metadata": { "namespace": "ns-0", "name": "obj-0" },
            "spec": spec,
        }))
        .expect("object must decode")
    }

    fn pool_ref() -> serde_json::Value {
        json!({
            "apiGroup": "ipam.cluster.x-k8s.io",
            "kind": "InClusterIPPool",
            "name": "pool-0",
        })
    }

    #[test]
    fn decodes_claims() {
        let obj = Object::from_dynamic(mk_dynamic(
            "ipam.cluster.x-k8s.io/v1alpha1",
            "IPAddressClaim",
            json!({ "poolRef": pool_ref() }),
        ));
        let claim = IPAddressClaim::narrow(&obj).expect("must be a claim");
        assert_eq!(claim.spec.pool_ref.kind, "InClusterIPPool");
        assert_eq!(
            claim.spec.pool_ref.api_group.as_deref(),
            Some("ipam.cluster.x-k8s.io")
        );
        assert!(IPAddress::narrow(&obj).is_none());
        assert_eq!(obj.kind(), "IPAddressClaim");
    }

    #[test]
    fn decodes_addresses() {
        let obj = Object::from_dynamic(mk_dynamic(
            "ipam.cluster.x-k8s.io/v1alpha1",
            "IPAddress",
            json!({
                "claimRef": { "name": "claim-0" },
                "poolRef": pool_ref(),
                "address": "10.0.0.10",
                "prefix": 24,
                "gateway": "10.0.0.1",
            }),
        ));
        let addr = IPAddress::narrow(&obj).expect("must be an address");
        assert_eq!(addr.spec.address, "10.0.0.10");
        assert_eq!(addr.spec.prefix, 24);
        assert!(IPAddressClaim::narrow(&obj).is_none());
        assert_eq!(addr.pool_ref().name, "pool-0");
    }

    #[test]
    fn missing_group_stays_absent() {
        let obj = Object::from_dynamic(mk_dynamic(
            "ipam.cluster.x-k8s.io/v1alpha1",
            "IPAddressClaim",
            json!({ "poolRef": { "kind": "InClusterIPPool", "name": "pool-0" } }),
        ));
        let claim = IPAddressClaim::narrow(&obj).expect("must be a claim");
        assert_eq!(claim.pool_ref().api_group, None);
    }

    #[test]
    fn other_types_are_not_narrowed() {
        for (api_version, kind) in [
            ("ipam.cluster.x-k8s.io/v1beta1", "IPAddressClaim"),
            ("example.io/v1alpha1", "IPAddress"),
            ("v1", "ConfigMap"),
        ] {
            let obj = Object::from_dynamic(mk_dynamic(
                api_version,
                kind,
                json!({ "poolRef": pool_ref() }),
            ));
            assert!(
                matches!(obj, Object::Other(_)),
                "{api_version}/{kind} must not be narrowed"
            );
            assert!(IPAddressClaim::narrow(&obj).is_none());
            assert!(IPAddress::narrow(&obj).is_none());
        }
    }

    #[test]
    fn undecodable_objects_are_other() {
        // An IPAddress without its required fields.
        let obj = Object::from_dynamic(mk_dynamic(
            "ipam.cluster.x-k8s.io/v1alpha1",
            "IPAddress",
            json!({ "poolRef": pool_ref() }),
        ));
        assert!(matches!(obj, Object::Other(_)));
        assert_eq!(obj.kind(), "IPAddress");
    }
}
