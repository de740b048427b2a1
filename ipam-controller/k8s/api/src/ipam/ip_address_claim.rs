use k8s_openapi::api::core::v1::{LocalObjectReference, TypedLocalObjectReference};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Requests an address from the pool referenced by `poolRef`.
#[derive(Clone, Debug, PartialEq, CustomResource, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "ipam.cluster.x-k8s.io",
    version = "v1alpha1",
    kind = "IPAddressClaim",
    status = "IPAddressClaimStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct IPAddressClaimSpec {
    pub pool_ref: TypedLocalObjectReference,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IPAddressClaimStatus {
    /// The address allocated for this claim, once one has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_ref: Option<LocalObjectReference>,
}
