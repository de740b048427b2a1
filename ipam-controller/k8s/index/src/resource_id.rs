use kube::ResourceExt;
use std::fmt;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ResourceId {
    pub namespace: String,
    pub name: String,
}

impl ResourceId {
    pub fn new(namespace: String, name: String) -> Self {
        Self { namespace, name }
    }

    /// Identifies a namespaced resource; `None` if it has no namespace or name.
    pub fn of<K: ResourceExt>(resource: &K) -> Option<Self> {
        let namespace = resource.namespace()?;
        let name = resource.meta().name.clone()?;
        Some(Self::new(namespace, name))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
