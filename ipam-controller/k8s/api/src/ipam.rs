//! Cluster API IPAM resources (`ipam.cluster.x-k8s.io`).

pub mod ip_address;
pub mod ip_address_claim;

pub use self::{
    ip_address::{IPAddress, IPAddressSpec},
    ip_address_claim::{IPAddressClaim, IPAddressClaimSpec, IPAddressClaimStatus},
};

pub const GROUP: &str = "ipam.cluster.x-k8s.io";
