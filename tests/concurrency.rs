use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use topichub::{Hub, HubError, HubOption};

const PUBLISHERS: usize = 8;
const PER_PUBLISHER: usize = 200;

#[test]
fn concurrent_publishers_reach_every_feed_in_order() {
    let hub = Arc::new(Hub::new([HubOption::channel_size(
        (PUBLISHERS * PER_PUBLISHER) as i64,
    )]));
    let mut feeds: Vec<_> = (0..4).map(|_| hub.subscribe("load").unwrap()).collect();

    let barrier = Arc::new(Barrier::new(PUBLISHERS));
    let handles: Vec<_> = (0..PUBLISHERS)
        .map(|p| {
            let hub = hub.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_PUBLISHER {
                    hub.publish("load", format!("{p}:{i}")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    hub.close().unwrap();

    for feed in &mut feeds {
        let mut last_seen: HashMap<usize, usize> = HashMap::new();
        let mut count = 0;
        while let Some(msg) = feed.blocking_recv() {
            let (p, i) = msg.payload.split_once(':').unwrap();
            let (p, i): (usize, usize) = (p.parse().unwrap(), i.parse().unwrap());
            if let Some(prev) = last_seen.insert(p, i) {
                assert!(i > prev, "publisher {p} out of order: {i} after {prev}");
            }
            count += 1;
        }
        assert_eq!(count, PUBLISHERS * PER_PUBLISHER);
        assert_eq!(feed.dropped(), 0);
    }

    let stats = hub.stats();
    assert_eq!(stats.published as usize, PUBLISHERS * PER_PUBLISHER);
    assert_eq!(stats.delivered as usize, 4 * PUBLISHERS * PER_PUBLISHER);
    assert_eq!(stats.dropped, 0);
}

#[test]
fn subscription_churn_leaves_registry_consistent() {
    let hub = Arc::new(Hub::new([HubOption::channel_size(4)]));
    let barrier = Arc::new(Barrier::new(PUBLISHERS + 4));

    let publishers: Vec<_> = (0..PUBLISHERS)
        .map(|p| {
            let hub = hub.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_PUBLISHER {
                    hub.publish(&format!("topic-{}", i % 3), format!("{p}:{i}"))
                        .unwrap();
                }
            })
        })
        .collect();

    let subscribers: Vec<_> = (0..4)
        .map(|s| {
            let hub = hub.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let topic = format!("topic-{}", s % 3);
                for _ in 0..100 {
                    let mut feed = hub.subscribe(&topic).unwrap();
                    let _ = feed.try_recv();
                    hub.unsubscribe(&topic, &feed).unwrap();
                    // drain until the hub's side is gone
                    while feed.blocking_recv().is_some() {}
                }
            })
        })
        .collect();

    for handle in publishers.into_iter().chain(subscribers) {
        handle.join().unwrap();
    }

    assert!(hub.topics().is_empty());
    assert_eq!(hub.stats().subscriptions, 0);
}

#[test]
fn slow_consumer_never_blocks_publisher() {
    let hub = Hub::new([HubOption::channel_size(1)]);
    let stalled = hub.subscribe("firehose").unwrap();

    for i in 0..10_000 {
        hub.publish("firehose", i.to_string()).unwrap();
    }

    assert_eq!(stalled.dropped(), 9_999);
    assert_eq!(hub.stats().delivered, 1);
}

#[test]
fn close_racing_with_operations() {
    let hub = Arc::new(Hub::default());
    let feeds: Vec<_> = (0..4).map(|_| hub.subscribe("race").unwrap()).collect();
    let barrier = Arc::new(Barrier::new(5));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let hub = hub.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                loop {
                    match hub.publish("race", "x") {
                        Ok(()) => {}
                        Err(HubError::Closed) => break,
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                    match hub.subscribe("race") {
                        Ok(feed) => match hub.unsubscribe("race", &feed) {
                            Ok(()) => {}
                            Err(HubError::Closed) => break,
                            Err(other) => panic!("unexpected error: {other}"),
                        },
                        Err(HubError::Closed) => break,
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
            })
        })
        .collect();

    barrier.wait();
    thread::sleep(Duration::from_millis(10));
    hub.close().unwrap();

    for worker in workers {
        worker.join().unwrap();
    }

    for mut feed in feeds {
        while feed.blocking_recv().is_some() {}
    }
    assert_eq!(hub.close(), Err(HubError::AlreadyClosed));
    assert_eq!(hub.subscriber_count("race"), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn tasks_share_a_hub() {
    let hub = Arc::new(Hub::new([HubOption::channel_size(64)]));
    let mut consumers = Vec::new();

    for topic in ["a", "b"] {
        let mut feed = hub.subscribe(topic).unwrap();
        consumers.push(tokio::spawn(async move {
            let mut received = Vec::new();
            while let Some(msg) = feed.recv().await {
                assert_eq!(msg.topic, feed.topic());
                received.push(msg.payload);
            }
            received
        }));
    }

    let producer = {
        let hub = hub.clone();
        tokio::spawn(async move {
            for i in 0..32 {
                hub.publish("a", format!("a{i}")).unwrap();
                hub.publish("b", format!("b{i}")).unwrap();
                tokio::task::yield_now().await;
            }
        })
    };
    producer.await.unwrap();
    hub.close().unwrap();

    for (consumer, prefix) in consumers.into_iter().zip(["a", "b"]) {
        let received = tokio::time::timeout(Duration::from_secs(5), consumer)
            .await
            .expect("consumer did not finish after close")
            .unwrap();
        assert_eq!(received.len(), 32);
        assert!(received.iter().all(|p| p.starts_with(prefix)));
    }
}
