use crate::index::Request;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

/// Drains reconciliation requests until every index has been dropped.
///
/// Reconciliation itself happens elsewhere; requests are only recorded here.
pub(crate) async fn process(mut requests: UnboundedReceiver<Request>) -> usize {
    let mut processed = 0;
    while let Some(Request { kind, id, category }) = requests.recv().await {
        info!(%kind, namespace = %id.namespace, name = %id.name, %category, "Reconcile requested");
        processed += 1;
    }
    processed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{index::ResourceId, predicates::Category};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn drains_until_closed() {
        let (tx, rx) = mpsc::unbounded_channel();
        for (name, category) in [("claim-0", Category::Create), ("claim-0", Category::Delete)] {
            tx.send(Request {
                kind: "IPAddressClaim".to_string(),
                id: ResourceId::new("ns-0".to_string(), name.to_string()),
                category,
            })
            .unwrap();
        }
        drop(tx);

        assert_eq!(process(rx).await, 2);
    }
}
