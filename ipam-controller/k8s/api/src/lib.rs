#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod group_kind;
pub mod ipam;
mod object;

pub use self::{
    group_kind::{GroupKind, InvalidGroupKind},
    ipam::{IPAddress, IPAddressClaim},
    object::{Object, ReferencesPool},
};
pub use k8s_openapi::api::core::v1::TypedLocalObjectReference;
pub use kube::core::{DynamicObject, TypeMeta};
