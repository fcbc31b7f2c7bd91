use std::time::Duration;

use inbox_model::{ErrorKind, FetchError, Session};
use inbox_test_source::{Fixture, TestSource};
use serde_json::json;

use crate::{FailurePolicy, SummaryAggregatorBuilder};

fn ids(summaries: &[crate::ConversationSummary]) -> Vec<&str> {
    summaries.iter().map(|s| s.id.as_str()).collect()
}

/// Two users, conversations "1" and "2" with one message each, "2" listed
/// first.
fn two_conversations() -> TestSource {
    let mut source = TestSource::default();
    source.add_user("1", "http://placekitten.com/g/300/300");
    source.add_user("3", "http://placekitten.com/g/302/302");
    source.add_conversation("2");
    source.add_conversation("1");
    source.add_message("2", "3", "Hello!", "2016-08-24T10:15:00.670Z");
    source.add_message("1", "1", "Moi!", "2016-08-25T10:15:00.670Z");
    source
}

#[tokio::test]
async fn test_sample_fixture() {
    let aggregator =
        SummaryAggregatorBuilder::with_source(TestSource::with_fixture(
            Fixture::sample(),
        ))
        .build();

    let summaries = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&summaries).unwrap(),
        json!([
            {
                "id": "1",
                "latest_message": {
                    "id": "1",
                    "body": "Moi!",
                    "from_user": {
                        "id": "1",
                        "avatar_url": "http://placekitten.com/g/300/300"
                    },
                    "created_at": "2016-08-25T10:15:00.670Z"
                }
            },
            {
                "id": "2",
                "latest_message": {
                    "id": "2",
                    "body": "Hello!",
                    "from_user": {
                        "id": "3",
                        "avatar_url": "http://placekitten.com/g/302/302"
                    },
                    "created_at": "2016-08-24T10:15:00.670Z"
                }
            },
            {
                "id": "3",
                "latest_message": {
                    "id": "3",
                    "body": "Hi!",
                    "from_user": {
                        "id": "1",
                        "avatar_url": "http://placekitten.com/g/300/300"
                    },
                    "created_at": "2016-08-23T10:15:00.670Z"
                }
            },
            {
                "id": "4",
                "latest_message": {
                    "id": "4",
                    "body": "Morning!",
                    "from_user": {
                        "id": "5",
                        "avatar_url": "http://placekitten.com/g/304/304"
                    },
                    "created_at": "2016-08-22T10:15:00.670Z"
                }
            },
            {
                "id": "5",
                "latest_message": {
                    "id": "5",
                    "body": "Pleep!",
                    "from_user": {
                        "id": "6",
                        "avatar_url": "http://placekitten.com/g/305/305"
                    },
                    "created_at": "2016-08-21T10:15:00.670Z"
                }
            }
        ])
    );
}

#[tokio::test]
async fn test_most_recent_first() {
    let aggregator =
        SummaryAggregatorBuilder::with_source(two_conversations()).build();

    let summaries = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap();
    assert_eq!(ids(&summaries), ["1", "2"]);
    assert_eq!(summaries[1].latest_message.body, "Hello!");
    assert_eq!(
        summaries[1].latest_message.from_user.avatar_url.as_deref(),
        Some("http://placekitten.com/g/302/302")
    );
}

#[tokio::test]
async fn test_unknown_sender() {
    let mut source = two_conversations();
    source.add_message("2", "9", "Who am I?", "2016-08-26T00:00:00Z");
    let aggregator = SummaryAggregatorBuilder::with_source(source).build();

    let summaries = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap();
    assert_eq!(ids(&summaries), ["2", "1"]);
    assert_eq!(summaries[0].latest_message.from_user.id, "9");
    assert_eq!(summaries[0].latest_message.from_user.avatar_url, None);
    assert_eq!(
        serde_json::to_value(&summaries[0]).unwrap()["latest_message"]
            ["from_user"],
        json!({ "id": "9" })
    );
}

#[tokio::test]
async fn test_user_without_avatar() {
    let mut fixture = Fixture::sample();
    let user = fixture.users.iter_mut().find(|u| u.id == "1").unwrap();
    user.avatar_url = None;
    let aggregator =
        SummaryAggregatorBuilder::with_source(TestSource::with_fixture(fixture))
            .build();

    let summaries = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap();
    assert_eq!(ids(&summaries), ["1", "2", "3", "4", "5"]);
    assert_eq!(summaries[0].latest_message.from_user.id, "1");
    assert_eq!(summaries[0].latest_message.from_user.avatar_url, None);
    assert_eq!(summaries[2].latest_message.from_user.avatar_url, None);
    assert!(summaries[1].latest_message.from_user.avatar_url.is_some());
}

#[tokio::test]
async fn test_empty_conversation_is_omitted() {
    let mut source = two_conversations();
    source.add_conversation("silent");
    let aggregator = SummaryAggregatorBuilder::with_source(source).build();

    let summaries = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap();
    assert_eq!(ids(&summaries), ["1", "2"]);
}

#[tokio::test]
async fn test_no_conversations() {
    let mut source = TestSource::default();
    source.add_user("1", "http://placekitten.com/g/300/300");
    let aggregator =
        SummaryAggregatorBuilder::with_source(source.clone()).build();

    let summaries = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap();
    assert!(summaries.is_empty());
    assert_eq!(source.requests(), 2);
}

#[tokio::test]
async fn test_listing_failure_aborts() {
    let mut source = TestSource::with_fixture(Fixture::sample());
    source.fail_conversations(FetchError::status(500, "boom"));
    let aggregator =
        SummaryAggregatorBuilder::with_source(source.clone()).build();

    let err = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    // No message list is requested without the conversation list.
    assert_eq!(source.requests(), 2);

    let mut source = TestSource::with_fixture(Fixture::sample());
    source.fail_users(FetchError::new(ErrorKind::Decode, "garbled"));
    let aggregator = SummaryAggregatorBuilder::with_source(source)
        .with_failure_policy(FailurePolicy::Skip)
        .build();

    let err = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_message_failure_aborts_by_default() {
    let mut source = TestSource::with_fixture(Fixture::sample());
    source.fail_messages("3", FetchError::new(ErrorKind::Transport, "reset"));
    let aggregator = SummaryAggregatorBuilder::with_source(source).build();

    let err = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.message(), "reset");
}

#[tokio::test]
async fn test_message_failure_skipped() {
    let session = Session::anonymous();
    let complete = SummaryAggregatorBuilder::with_source(
        TestSource::with_fixture(Fixture::sample()),
    )
    .build()
    .recent_conversation_summaries(&session)
    .await
    .unwrap();

    let mut source = TestSource::with_fixture(Fixture::sample());
    source.fail_messages("3", FetchError::status(503, "unavailable"));
    let aggregator = SummaryAggregatorBuilder::with_source(source)
        .with_failure_policy(FailurePolicy::Skip)
        .build();
    let summaries = aggregator
        .recent_conversation_summaries(&session)
        .await
        .unwrap();

    assert_eq!(ids(&summaries), ["1", "2", "4", "5"]);
    // The remaining summaries are exactly what a clean run produces.
    let expected: Vec<_> =
        complete.into_iter().filter(|s| s.id != "3").collect();
    assert_eq!(summaries, expected);
}

#[tokio::test(start_paused = true)]
async fn test_concurrency_is_bounded() {
    let mut source = TestSource::default();
    source.add_user("1", "http://placekitten.com/g/300/300");
    for i in 0..10 {
        let id = i.to_string();
        source.add_conversation(&id);
        source.add_message(
            &id,
            "1",
            "ping",
            &format!("2016-08-25T10:{i:02}:00Z"),
        );
    }
    source.set_delay(Duration::from_millis(50));
    let aggregator = SummaryAggregatorBuilder::with_source(source.clone())
        .with_concurrency(3)
        .build();

    let summaries = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap();
    assert_eq!(summaries.len(), 10);
    assert_eq!(summaries[0].id, "9");
    assert_eq!(source.requests(), 12);
    assert_eq!(source.max_in_flight(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_concurrency_below_one() {
    let mut source = two_conversations();
    source.set_delay(Duration::from_millis(10));
    let aggregator = SummaryAggregatorBuilder::with_source(source.clone())
        .with_concurrency(0)
        .build();

    let summaries = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap();
    assert_eq!(ids(&summaries), ["1", "2"]);
    // Both listings run together, message lists one at a time.
    assert_eq!(source.max_in_flight(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_completion_order_does_not_matter() {
    let mut source = TestSource::default();
    source.add_user("1", "http://placekitten.com/g/300/300");
    for id in ["a", "b", "c", "d"] {
        source.add_conversation(id);
        // All latest messages share one instant, written differently.
        source.add_message(id, "1", id, "2016-08-25T10:15:00Z");
    }
    source.add_message("c", "1", "c", "2016-08-25T12:15:00+02:00");
    // Later conversations answer first.
    source.set_message_delay("a", Duration::from_millis(40));
    source.set_message_delay("b", Duration::from_millis(30));
    source.set_message_delay("c", Duration::from_millis(20));
    source.set_message_delay("d", Duration::from_millis(10));
    let aggregator = SummaryAggregatorBuilder::with_source(source)
        .with_concurrency(4)
        .build();

    let summaries = aggregator
        .recent_conversation_summaries(&Session::anonymous())
        .await
        .unwrap();
    // Equal instants keep the listing order.
    assert_eq!(ids(&summaries), ["a", "b", "c", "d"]);
    assert_eq!(summaries[2].latest_message.id, "c:0");
}
