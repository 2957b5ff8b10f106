use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::Result;
use crate::model::{LiveStreamRecord, StatusView, SubscriptionEntry};
use crate::snapshot::SnapshotStore;

/// Split the follow list into live and offline channels.
///
/// Every subscription ends up in exactly one group. Live records for
/// channels that are not followed are dropped. Both groups come out sorted
/// ascending; the live group by the record's full field tuple.
pub fn reconcile(live: &[LiveStreamRecord], subs: &[SubscriptionEntry]) -> StatusView {
    let followed: BTreeSet<&str> = subs.iter().map(|s| s.streamer_id.as_str()).collect();

    let mut sorted_live: Vec<&LiveStreamRecord> = live.iter().collect();
    sorted_live.sort();

    // First record in sort order wins when the cache repeats a channel.
    let mut live_by_id: BTreeMap<&str, &LiveStreamRecord> = BTreeMap::new();
    for record in sorted_live {
        if !followed.contains(record.streamer_id.as_str()) {
            debug!("ignoring live channel {} (not followed)", record.streamer_id);
            continue;
        }
        live_by_id.entry(record.streamer_id.as_str()).or_insert(record);
    }

    let mut view = StatusView::default();
    for id in followed {
        match live_by_id.get(id) {
            Some(record) => view.live.push((*record).clone()),
            None => view.offline.push(id.to_string()),
        }
    }
    view.live.sort();
    view
}

/// Read both documents and reconcile them. A failed read is returned as-is;
/// nothing is reconciled from partial data.
pub fn reconcile_store(store: &SnapshotStore) -> Result<StatusView> {
    let live = store.read_live_snapshot()?;
    let subs = store.read_subscriptions()?;
    let view = reconcile(&live, &subs);
    debug!(
        "reconciled {} live / {} offline",
        view.live.len(),
        view.offline.len()
    );
    Ok(view)
}
