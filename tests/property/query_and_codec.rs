//! Property-based tests for list query mapping and body decoding.
//!
//! Uses proptest to verify:
//! 1. `completed` is sent exactly when the filter is not "all", with the
//!    value matching the filter.
//! 2. `sort` is sent exactly when the sort key is not "date".
//! 3. Any task the client can hold survives the JSON shape the server uses.
//! 4. Random bytes never cause a panic in the decoders.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use taskdeck_proto::codec;
use taskdeck_proto::query::{Filter, ListQuery, SortKey};
use taskdeck_proto::task::{Priority, Task, TaskId};

fn arb_filter() -> impl Strategy<Value = Filter> {
    prop::sample::select(Filter::ALL.to_vec())
}

fn arb_sort() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop::sample::select(Priority::ALL.to_vec())
}

/// Timestamps at whole-second precision within a sane range.
fn arb_timestamp() -> impl Strategy<Value = chrono::DateTime<Utc>> {
    (0i64..4_000_000_000).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or_else(Utc::now)
    })
}

fn arb_task() -> impl Strategy<Value = Task> {
    (
        "[a-f0-9]{1,24}",
        "[^\x00]{1,128}",
        prop::option::of("[^\x00]{1,256}"),
        arb_priority(),
        any::<bool>(),
        arb_timestamp(),
        arb_timestamp(),
    )
        .prop_map(
            |(id, title, description, priority, completed, created_at, updated_at)| Task {
                id: TaskId::new(id),
                title,
                description,
                priority,
                completed,
                created_at,
                updated_at,
            },
        )
}

proptest! {
    #[test]
    fn completed_param_tracks_filter(filter in arb_filter(), sort in arb_sort()) {
        let pairs = ListQuery::new(filter, sort).pairs();
        let completed: Vec<_> = pairs.iter().filter(|(k, _)| *k == "completed").collect();
        match filter {
            Filter::All => prop_assert!(completed.is_empty()),
            Filter::Pending => prop_assert_eq!(completed, vec![&("completed", "false")]),
            Filter::Completed => prop_assert_eq!(completed, vec![&("completed", "true")]),
        }
    }

    #[test]
    fn sort_param_only_for_non_default(filter in arb_filter(), sort in arb_sort()) {
        let pairs = ListQuery::new(filter, sort).pairs();
        let sent = pairs.iter().find(|(k, _)| *k == "sort").map(|(_, v)| *v);
        if sort == SortKey::Date {
            prop_assert_eq!(sent, None);
        } else {
            prop_assert_eq!(sent, Some(sort.as_str()));
        }
    }

    #[test]
    fn task_list_survives_server_json_shape(tasks in prop::collection::vec(arb_task(), 0..8)) {
        let bytes = codec::encode(&tasks).unwrap();
        let decoded = codec::decode_tasks(&bytes).unwrap();
        prop_assert_eq!(decoded, tasks);
    }

    #[test]
    fn decoders_never_panic_on_random_bytes(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = codec::decode_tasks(&bytes);
        let _ = codec::decode_stats(&bytes);
        let _ = codec::decode_task(&bytes);
        let _ = codec::error_message(&bytes);
    }
}
