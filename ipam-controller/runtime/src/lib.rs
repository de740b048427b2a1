#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub use ipam_controller_k8s_api as k8s;
pub use ipam_controller_k8s_index as index;
pub use ipam_controller_predicates as predicates;

mod args;
mod requests;

pub use self::args::Args;
