#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Predicates that decide which watch notifications reach the IP address
//! claim reconciler.

mod notification;
mod references;


pub use self::{
    notification::{Category, Notification},
    references::{AddressReferencesPoolKind, ClaimReferencesPoolKind, ReferencesPoolKind},
};
pub use ipam_controller_k8s_api::{GroupKind, Object};

/// Decides whether a notification about an object should be processed.
///
/// Implementors provide a single evaluation; each notification category is
/// mapped onto it. Updates are judged by the new object only.
pub trait Predicate<T = Object> {
    fn evaluate(&self, obj: &T) -> bool;

    fn create(&self, obj: &T) -> bool {
        self.evaluate(obj)
    }

    fn delete(&self, obj: &T) -> bool {
        self.evaluate(obj)
    }

    fn update(&self, _old: &T, new: &T) -> bool {
        self.evaluate(new)
    }

    fn generic(&self, obj: &T) -> bool {
        self.evaluate(obj)
    }

    /// Dispatches a notification to the entry point for its category.
    fn filter(&self, notification: &Notification<'_, T>) -> bool {
        match *notification {
            Notification::Create(obj) => self.create(obj),
            Notification::Delete(obj) => self.delete(obj),
            Notification::Update { old, new } => self.update(old, new),
            Notification::Generic(obj) => self.generic(obj),
        }
    }
}
