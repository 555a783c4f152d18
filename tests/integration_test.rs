//! Integration tests for chanlog.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chanlog::core::{
    ClientMessage, ClientMessageType, Message, MessageType, PostId, PostType, ServerTime,
};
use chanlog::log::{ChronologicalMessages, Messages, Placement};

fn at(millis: i64) -> ServerTime {
    ServerTime::from_millis(millis).expect("valid timestamp")
}

fn post(millis: i64, id: &str) -> Message {
    let mut m = Message::new(id.into(), MessageType::Post(PostType::Normal), at(millis));
    m.post_id = Some(PostId::new(id));
    m
}

fn client(millis: i64, kind: ClientMessageType) -> Message {
    ClientMessage::new("client", at(millis), kind).into()
}

fn ids(log: &ChronologicalMessages) -> Vec<String> {
    log.iter()
        .filter_map(|m| m.post_id.as_ref().map(ToString::to_string))
        .collect()
}

fn dates(log: &ChronologicalMessages) -> Vec<i64> {
    log.iter().map(|m| m.date.as_millis()).collect()
}

mod scenarios {
    use super::*;

    #[test]
    fn test_duplicate_at_shared_timestamp_is_dropped() {
        let log: ChronologicalMessages = [post(10, "A"), post(20, "B"), post(20, "B"), post(30, "C")]
            .into_iter()
            .collect();
        assert_eq!(ids(&log), ["A", "B", "C"]);

        let mut again = log.clone();
        assert_eq!(again.insert(post(20, "B")), Placement::Duplicate);
        assert_eq!(again, log);
    }

    #[test]
    fn test_messages_after_time() {
        let log: ChronologicalMessages = [post(10, "a"), post(20, "b"), post(30, "c")]
            .into_iter()
            .collect();
        assert_eq!(dates(&log.messages_after(at(15))), [20, 30]);
    }

    #[test]
    fn test_latest_matching_skips_trailing_client_messages() {
        let log: ChronologicalMessages = [
            post(10, "a"),
            post(20, "b"),
            client(30, ClientMessageType::Error),
            client(40, ClientMessageType::NewMessagesTransition),
        ]
        .into_iter()
        .collect();
        let found = log.latest_matching(Message::is_server_post);
        assert_eq!(found.and_then(|m| m.post_id.clone()), Some(PostId::new("b")));

        let only_client: ChronologicalMessages = [
            client(30, ClientMessageType::Error),
            client(40, ClientMessageType::Informative),
        ]
        .into_iter()
        .collect();
        assert!(only_client.latest_matching(Message::is_server_post).is_none());
    }

    #[test]
    fn test_live_channel_with_backfill() {
        // live traffic first, then a page of history arrives
        let mut log = ChronologicalMessages::new()
            .add_message(post(100, "live1"))
            .add_message(client(150, ClientMessageType::NewMessagesTransition))
            .add_message(post(200, "live2"));
        for old in [post(50, "old2"), post(10, "old1"), post(100, "live1")] {
            log.insert(old);
        }

        assert_eq!(dates(&log), [10, 50, 100, 150, 200]);
        assert_eq!(ids(&log), ["old1", "old2", "live1", "live2"]);
        assert_eq!(log.earliest_id(), Some(&PostId::new("old1")));
        assert_eq!(log.next_id(Some(&PostId::new("live1"))), Some(&PostId::new("live2")));
    }

    #[test]
    fn test_tombstone_stays_in_place() {
        let mut log: ChronologicalMessages = [post(10, "a"), post(20, "b"), post(30, "c")]
            .into_iter()
            .collect();
        // owner applies the deletion in place after a lookup
        let split = log.clone().split_at(Some(&PostId::new("b")));
        let mut tomb = split.found.expect("b is present");
        tomb.deleted = true;
        log = split
            .before
            .unreverse()
            .add_message(tomb)
            .append(split.after);

        assert_eq!(log.len(), 3);
        assert_eq!(log.previous_id(Some(&PostId::new("c"))), Some(&PostId::new("a")));
        assert_eq!(log.next_id(Some(&PostId::new("a"))), Some(&PostId::new("c")));
    }

    #[test]
    fn test_retrograde_view_iterates_newest_first() {
        let log: ChronologicalMessages = [post(10, "a"), post(20, "b")].into_iter().collect();
        let newest_first: Vec<i64> = log
            .reverse()
            .iter()
            .map(|m| m.date.as_millis())
            .collect();
        assert_eq!(newest_first, [20, 10]);
    }
}

mod predicates {
    use super::*;
    use test_case::test_case;

    #[test_case(MessageType::Post(PostType::Normal), true ; "normal post")]
    #[test_case(MessageType::Post(PostType::Emote), true ; "emote")]
    #[test_case(MessageType::Post(PostType::Join), false ; "join")]
    #[test_case(MessageType::Post(PostType::Leave), false ; "leave")]
    #[test_case(MessageType::Post(PostType::TopicChange), false ; "topic change")]
    #[test_case(MessageType::Post(PostType::System), false ; "system")]
    #[test_case(MessageType::Client(ClientMessageType::Informative), false ; "informative")]
    #[test_case(MessageType::Client(ClientMessageType::Error), false ; "error")]
    #[test_case(MessageType::Client(ClientMessageType::DateTransition), false ; "date transition")]
    #[test_case(MessageType::Client(ClientMessageType::NewMessagesTransition), false ; "new messages")]
    #[test_case(MessageType::Client(ClientMessageType::UnknownGapBefore), false ; "gap before")]
    #[test_case(MessageType::Client(ClientMessageType::UnknownGapAfter), false ; "gap after")]
    fn user_capabilities(kind: MessageType, expected: bool) {
        let msg = Message::new("x".into(), kind, at(0));
        assert_eq!(msg.is_deletable(), expected);
        assert_eq!(msg.is_replyable(), expected);
        assert_eq!(msg.is_editable(), expected);
    }

    #[test_case(PostType::Join, true ; "join")]
    #[test_case(PostType::Leave, true ; "leave")]
    #[test_case(PostType::Normal, false ; "normal")]
    #[test_case(PostType::System, false ; "system")]
    fn join_leave(kind: PostType, expected: bool) {
        let msg = Message::new("x".into(), MessageType::Post(kind), at(0));
        assert_eq!(msg.is_join_leave(), expected);
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// (date, identity) pairs; identities drawn from a small pool so
    /// collisions happen often. `None` is a client-generated message.
    fn arrivals() -> impl Strategy<Value = Vec<(i64, Option<u8>)>> {
        prop::collection::vec((0i64..50, prop::option::of(0u8..12)), 0..60)
    }

    fn to_message((millis, id): (i64, Option<u8>)) -> Message {
        id.map_or_else(
            || client(millis, ClientMessageType::Informative),
            |id| post(millis, &format!("p{id}")),
        )
    }

    /// Drops arrivals that reuse an identity at a different date, so every
    /// identity maps to exactly one date.
    fn consistent(arrivals: Vec<(i64, Option<u8>)>) -> Vec<(i64, Option<u8>)> {
        let mut seen = std::collections::HashMap::new();
        arrivals
            .into_iter()
            .filter(|(date, id)| id.is_none_or(|id| *seen.entry(id).or_insert(*date) == *date))
            .collect()
    }

    fn build(arrivals: Vec<(i64, Option<u8>)>) -> ChronologicalMessages {
        arrivals.into_iter().map(to_message).collect()
    }

    proptest! {
        #[test]
        fn log_is_date_ordered(arrivals in arrivals()) {
            let log = build(arrivals);
            let dates = dates(&log);
            prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn identities_are_unique(arrivals in arrivals().prop_map(consistent)) {
            let log = build(arrivals);
            let ids = ids(&log);
            let unique: std::collections::HashSet<_> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }

        #[test]
        fn reinsertion_is_idempotent(arrivals in arrivals(), pick in any::<prop::sample::Index>()) {
            let log = build(arrivals);
            prop_assume!(log.iter().any(|m| m.post_id.is_some()));
            let posts: Vec<&Message> = log.iter().filter(|m| m.post_id.is_some()).collect();
            let again = posts[pick.index(posts.len())].clone();
            prop_assert_eq!(log.clone().add_message(again), log);
        }

        #[test]
        fn reverse_round_trips(arrivals in arrivals()) {
            let log = build(arrivals);
            let reversed = log.clone().reverse();
            let mut expected: Vec<&Message> = log.iter().collect();
            expected.reverse();
            prop_assert_eq!(reversed.iter().collect::<Vec<_>>(), expected);
            prop_assert_eq!(reversed.unreverse(), log);
        }

        #[test]
        fn split_reconstructs_log(arrivals in arrivals().prop_map(consistent), pick in any::<prop::sample::Index>()) {
            let log = build(arrivals);
            let ids = ids(&log);
            prop_assume!(!ids.is_empty());
            let target = PostId::new(ids[pick.index(ids.len())].clone());

            let split = log.clone().split_at(Some(&target));
            let found = split.found.expect("present id is found");
            prop_assert_eq!(found.post_id.as_ref(), Some(&target));

            let rebuilt: Messages<_, Message> = split
                .before
                .unreverse()
                .append(std::iter::once(found).collect())
                .append(split.after);
            prop_assert_eq!(rebuilt, log);
        }

        #[test]
        fn next_and_previous_are_symmetric(
            arrivals in arrivals().prop_map(consistent),
            deleted in prop::collection::vec(any::<bool>(), 60),
        ) {
            let log: ChronologicalMessages = build(arrivals)
                .into_iter()
                .zip(deleted)
                .map(|(mut m, d)| { m.deleted = d && m.post_id.is_some(); m })
                .collect();
            let selectable: Vec<PostId> = log
                .iter()
                .filter(|m| !m.deleted)
                .filter_map(|m| m.post_id.clone())
                .collect();
            for pair in selectable.windows(2) {
                prop_assert_eq!(log.next_id(Some(&pair[0])), Some(&pair[1]));
                prop_assert_eq!(log.previous_id(Some(&pair[1])), Some(&pair[0]));
            }
            prop_assert_eq!(log.latest_id(), selectable.last());
            prop_assert_eq!(log.earliest_id(), selectable.first());
        }

        #[test]
        fn messages_after_is_the_dated_suffix(arrivals in arrivals(), cutoff in 0i64..50) {
            let log = build(arrivals);
            let suffix = log.messages_after(at(cutoff));
            let expected: Vec<i64> = dates(&log).into_iter().filter(|d| *d > cutoff).collect();
            prop_assert_eq!(dates(&suffix), expected);
        }
    }
}
