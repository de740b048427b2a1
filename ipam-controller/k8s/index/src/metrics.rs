use prometheus_client::{
    encoding::{EncodeLabelSet, EncodeLabelValue, LabelValueEncoder},
    metrics::{counter::Counter, family::Family},
    registry::Registry,
};
use std::fmt::Write;

#[derive(Clone, Debug, Default)]
pub struct IndexMetrics {
    notifications: Family<NotificationLabels, Counter>,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct NotificationLabels {
    kind: String,
    category: String,
    result: Outcome,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
enum Outcome {
    Accepted,
    Rejected,
}

impl EncodeLabelValue for Outcome {
    fn encode(&self, encoder: &mut LabelValueEncoder<'_>) -> Result<(), std::fmt::Error> {
        encoder.write_str(match self {
            Outcome::Accepted => "accepted",
            Outcome::Rejected => "rejected",
        })
    }
}

impl IndexMetrics {
    pub fn register(prom: &mut Registry) -> Self {
        let notifications = Family::default();
        prom.register(
            "notifications",
            "Count of watch notifications evaluated by pool predicates",
            notifications.clone(),
        );

        Self { notifications }
    }

    pub(crate) fn observe(&self, kind: &str, category: &str, accepted: bool) {
        let result = if accepted {
            Outcome::Accepted
        } else {
            Outcome::Rejected
        };
        self.notifications
            .get_or_create(&NotificationLabels {
                kind: kind.to_string(),
                category: category.to_string(),
                result,
            })
            .inc();
    }

    #[cfg(test)]
    pub(crate) fn count(&self, kind: &str, category: &str, accepted: bool) -> u64 {
        let result = if accepted {
            Outcome::Accepted
        } else {
            Outcome::Rejected
        };
        self.notifications
            .get_or_create(&NotificationLabels {
                kind: kind.to_string(),
                category: category.to_string(),
                result,
            })
            .get()
    }
}
