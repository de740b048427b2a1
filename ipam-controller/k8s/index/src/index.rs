use crate::{metrics::IndexMetrics, resource_id::ResourceId};
use ahash::AHashMap as HashMap;
use ipam_controller_k8s_api::Object;
use ipam_controller_predicates::{Category, Notification, Predicate};
use kube::Resource;
use parking_lot::RwLock;
use std::{marker::PhantomData, sync::Arc};
use tokio::sync::mpsc::UnboundedSender;

pub type SharedIndex<K, P> = Arc<RwLock<Index<K, P>>>;

/// Tracks the resources of type `K` observed by a watch and enqueues those
/// that pass the predicate `P`.
pub struct Index<K, P> {
    predicate: P,
    objects: HashMap<ResourceId, Object>,
    requests: UnboundedSender<Request>,
    metrics: IndexMetrics,
    _kind: PhantomData<fn(K)>,
}

/// Asks the reconciler to process a resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub kind: String,
    pub id: ResourceId,
    pub category: Category,
}

// === impl Index ===

impl<K, P> Index<K, P>
where
    K: Resource<DynamicType = ()>,
    P: Predicate,
{
    pub fn new(predicate: P, requests: UnboundedSender<Request>, metrics: IndexMetrics) -> Self {
        Self {
            predicate,
            objects: HashMap::default(),
            requests,
            metrics,
            _kind: PhantomData,
        }
    }

    pub fn shared(
        predicate: P,
        requests: UnboundedSender<Request>,
        metrics: IndexMetrics,
    ) -> SharedIndex<K, P> {
        Arc::new(RwLock::new(Self::new(predicate, requests, metrics)))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Evaluates every known resource as a generic notification.
    pub fn resync(&self) {
        let kind = K::kind(&());
        tracing::debug!(%kind, resources = self.objects.len(), "Resyncing");
        for (id, obj) in self.objects.iter() {
            self.notify(id, Notification::Generic(obj));
        }
    }

    fn notify(&self, id: &ResourceId, notification: Notification<'_, Object>) {
        let kind = notification.object().kind();
        let category = notification.category();
        let accepted = self.predicate.filter(&notification);
        self.metrics.observe(kind, category.as_str(), accepted);
        if !accepted {
            tracing::trace!(%id, %category, "Skipping");
            return;
        }

        tracing::debug!(%id, %category, "Enqueueing");
        if let Err(error) = self.requests.send(Request {
            kind: kind.to_string(),
            id: id.clone(),
            category,
        }) {
            tracing::error!(%id.namespace, %id.name, %error, "Failed to enqueue request");
        }
    }
}

impl<K, P> kubert::index::IndexNamespacedResource<K> for Index<K, P>
where
    K: Resource<DynamicType = ()> + Into<Object>,
    P: Predicate,
{
    fn apply(&mut self, resource: K) {
        let id = match ResourceId::of(&resource) {
            Some(id) => id,
            None => {
                let kind = K::kind(&());
                tracing::debug!(%kind, "Ignoring resource without a namespace or name");
                return;
            }
        };

        let new: Object = resource.into();
        match self.objects.remove(&id) {
            Some(old) => self.notify(&id, Notification::Update { old: &old, new: &new }),
            None => self.notify(&id, Notification::Create(&new)),
        }
        self.objects.insert(id, new);
    }

    fn delete(&mut self, namespace: String, name: String) {
        let id = ResourceId::new(namespace, name);
        match self.objects.remove(&id) {
            Some(obj) => self.notify(&id, Notification::Delete(&obj)),
            None => tracing::debug!(%id, "Deleted resource was never observed"),
        }
    }
}
