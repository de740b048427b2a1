use crate::{
    index::{self, IndexMetrics, SharedIndex},
    k8s::{self, GroupKind},
    predicates::{AddressReferencesPoolKind, ClaimReferencesPoolKind, Predicate},
    requests,
};
use anyhow::{bail, Result};
use clap::Parser;
use kube::{runtime::watcher, Resource};
use prometheus_client::registry::Registry;
use tokio::{sync::mpsc, time};
use tracing::{info, info_span, Instrument};

#[derive(Debug, Parser)]
#[clap(
    name = "ipam",
    about = "Watches IP address claims and addresses that reference a pool kind"
)]
pub struct Args {
    #[clap(long, default_value = "ipam=info,warn", env = "IPAM_CONTROLLER_LOG")]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    #[clap(flatten)]
    client: kubert::ClientArgs,

    #[clap(flatten)]
    admin: kubert::AdminArgs,

    /// The pool kind that claims and addresses must reference, as `Kind.group`.
    #[clap(long, default_value = "InClusterIPPool.ipam.cluster.x-k8s.io")]
    pool_kind: GroupKind,

    /// Seconds between resyncs of all known resources. Zero disables resyncs.
    #[clap(long, default_value = "600")]
    resync_period_secs: u64,
}

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            log_level,
            log_format,
            client,
            admin,
            pool_kind,
            resync_period_secs,
        } = self;

        let mut prom = <Registry>::default();
        let metrics = IndexMetrics::register(prom.sub_registry_with_prefix("ipam_index"));

        let mut runtime = kubert::Runtime::builder()
            .with_log(log_level, log_format)
            .with_admin(admin.into_builder().with_prometheus(prom))
            .with_client(client)
            .build()
            .await?;

        // Both indexes feed a single request queue.
        let (requests_tx, requests_rx) = mpsc::unbounded_channel();
        let claims_index = index::Index::<k8s::IPAddressClaim, _>::shared(
            ClaimReferencesPoolKind::new(pool_kind.clone()),
            requests_tx.clone(),
            metrics.clone(),
        );
        let addresses_index = index::Index::<k8s::IPAddress, _>::shared(
            AddressReferencesPoolKind::new(pool_kind.clone()),
            requests_tx,
            metrics,
        );

        let claims = runtime.watch_all::<k8s::IPAddressClaim>(watcher::Config::default());
        tokio::spawn(
            kubert::index::namespaced(claims_index.clone(), claims)
                .instrument(info_span!("ipaddressclaims")),
        );

        let addresses = runtime.watch_all::<k8s::IPAddress>(watcher::Config::default());
        tokio::spawn(
            kubert::index::namespaced(addresses_index.clone(), addresses)
                .instrument(info_span!("ipaddresses")),
        );

        if resync_period_secs > 0 {
            let period = time::Duration::from_secs(resync_period_secs);
            tokio::spawn(resync(claims_index, period).instrument(info_span!("ipaddressclaims")));
            tokio::spawn(resync(addresses_index, period).instrument(info_span!("ipaddresses")));
        }

        tokio::spawn(requests::process(requests_rx).instrument(info_span!("requests")));

        info!(%pool_kind, "Watching IP address claims and addresses");

        // Block the main thread on the shutdown signal. Once it fires, wait for the background tasks to
        // complete before exiting.
        if runtime.run().await.is_err() {
            bail!("Aborted");
        }

        Ok(())
    }
}

/// Periodically re-evaluates every resource in the index.
async fn resync<K, P>(index: SharedIndex<K, P>, period: time::Duration)
where
    K: Resource<DynamicType = ()>,
    P: Predicate,
{
    let mut interval = time::interval_at(time::Instant::now() + period, period);
    loop {
        interval.tick().await;
        index.read().resync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_in_cluster_pools() {
        let args = Args::try_parse_from(["ipam"]).expect("defaults must parse");
        assert_eq!(args.pool_kind.kind(), "InClusterIPPool");
        assert_eq!(args.pool_kind.group(), "ipam.cluster.x-k8s.io");
        assert_eq!(args.resync_period_secs, 600);
    }

    #[test]
    fn parses_pool_kind() {
        let args = Args::try_parse_from([
            "ipam",
            "--pool-kind",
            "GlobalInClusterIPPool.ipam.cluster.x-k8s.io",
            "--resync-period-secs",
            "0",
        ])
        .expect("args must parse");
        assert_eq!(args.pool_kind.kind(), "GlobalInClusterIPPool");
        assert_eq!(args.resync_period_secs, 0);
    }

    #[test]
    fn rejects_unqualified_pool_kind() {
        assert!(Args::try_parse_from(["ipam", "--pool-kind", "InClusterIPPool"]).is_err());
        assert!(Args::try_parse_from(["ipam", "--pool-kind", "InClusterIPPool."]).is_err());
    }
}
