//! Worker loop behavior: claiming, terminal events, and cancellation.

use std::sync::Arc;
use std::time::Duration;

use linkbot::domain::{RoutineKind, TradePayload};
use linkbot::error::ExecutionError;
use linkbot::port::AcceptAllValidator;
use linkbot::queue::{EtaEstimator, QueueManager};
use linkbot::service::{ActiveTrades, SubmitRequest, SubmitService, TradeWorker};
use linkbot::testkit::device::{Script, ScriptedDevice};
use linkbot::testkit::sink::{RecordedEvent, RecordingSink};
use tokio_util::sync::CancellationToken;

struct Fixture {
    service: SubmitService,
    queues: Arc<QueueManager>,
    active: Arc<ActiveTrades>,
    shutdown: CancellationToken,
}

impl Fixture {
    fn new() -> Self {
        let queues = Arc::new(QueueManager::new());
        let service = SubmitService::new(
            Arc::clone(&queues),
            Arc::new(AcceptAllValidator),
            EtaEstimator::new(1, 1.5, 1.0),
        );
        Self {
            service,
            queues,
            active: Arc::new(ActiveTrades::new()),
            shutdown: CancellationToken::new(),
        }
    }

    fn worker(&self, script: Vec<Script>) -> TradeWorker {
        TradeWorker::new(
            Arc::new(ScriptedDevice::new("scripted", script)),
            Arc::clone(&self.queues),
            RoutineKind::ALL.to_vec(),
            Arc::clone(&self.active),
            self.shutdown.clone(),
            Duration::from_millis(5),
        )
    }

    async fn submit(&self, requester: u64, sink: &RecordingSink) {
        let request = SubmitRequest::new(
            TradePayload::new(25, "Pikachu"),
            requester.into(),
            "Ash",
            RoutineKind::LinkTrade,
            Arc::new(sink.clone()),
        );
        assert!(self.service.submit(request).await.is_accepted());
    }
}

#[tokio::test]
async fn completed_trade_fires_initialize_then_finished() {
    let fixture = Fixture::new();
    let sink = RecordingSink::new();
    fixture.submit(1, &sink).await;

    let worker = fixture.worker(vec![Script::Complete(TradePayload::new(132, "Ditto"))]);
    let entry = fixture
        .queues
        .queue(RoutineKind::LinkTrade)
        .claim_next()
        .unwrap();
    worker.process(entry).await;

    assert_eq!(
        sink.kinds(),
        vec![RecordedEvent::Initialize, RecordedEvent::Finished]
    );
    assert!(fixture.queues.queue(RoutineKind::LinkTrade).is_empty());
    assert!(fixture.active.is_empty());
}

#[tokio::test]
async fn requester_can_requeue_after_hearing_the_terminal_event() {
    let fixture = Fixture::new();
    let sink = RecordingSink::new();
    fixture.submit(1, &sink).await;

    let worker = fixture.worker(vec![Script::Complete(TradePayload::empty())]);
    let entry = fixture
        .queues
        .queue(RoutineKind::LinkTrade)
        .claim_next()
        .unwrap();
    worker.process(entry).await;

    // The finished entry is out of the queue, so the same requester is
    // admitted again at once.
    fixture.submit(1, &sink).await;
    assert_eq!(fixture.queues.queue(RoutineKind::LinkTrade).len(), 1);
}

#[tokio::test]
async fn aborted_trade_cancels_with_the_device_reason() {
    let fixture = Fixture::new();
    let sink = RecordingSink::new();
    fixture.submit(1, &sink).await;

    let worker = fixture.worker(vec![Script::Abort("partner never appeared".to_string())]);
    let entry = fixture
        .queues
        .queue(RoutineKind::LinkTrade)
        .claim_next()
        .unwrap();
    worker.process(entry).await;

    assert_eq!(
        sink.kinds(),
        vec![RecordedEvent::Initialize, RecordedEvent::Canceled]
    );
    assert_eq!(sink.texts(), vec!["partner never appeared".to_string()]);
    assert!(fixture.queues.queue(RoutineKind::LinkTrade).is_empty());
}

#[tokio::test]
async fn device_error_also_ends_in_a_single_cancel() {
    let fixture = Fixture::new();
    let sink = RecordingSink::new();
    fixture.submit(1, &sink).await;

    let worker = fixture.worker(vec![Script::Fail(ExecutionError::ConnectionLost(
        "socket closed".to_string(),
    ))]);
    let entry = fixture
        .queues
        .queue(RoutineKind::LinkTrade)
        .claim_next()
        .unwrap();
    worker.process(entry).await;

    assert_eq!(
        sink.kinds(),
        vec![RecordedEvent::Initialize, RecordedEvent::Canceled]
    );
    assert!(fixture.active.is_empty());
}

#[tokio::test(start_paused = true)]
async fn running_trade_is_cancelable_through_the_registry() {
    let fixture = Fixture::new();
    let sink = RecordingSink::new();
    fixture.submit(1, &sink).await;

    let worker = fixture.worker(vec![Script::BlockUntilCanceled]);
    let handle = tokio::spawn(worker.run());

    // Wait for the worker to claim and register the trade.
    while fixture.active.is_empty() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    let entry = fixture
        .queues
        .queue(RoutineKind::LinkTrade)
        .find(1u64.into())
        .unwrap();
    assert!(fixture.active.cancel(entry.id()));

    while !fixture.queues.queue(RoutineKind::LinkTrade).is_empty() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert_eq!(
        sink.kinds(),
        vec![RecordedEvent::Initialize, RecordedEvent::Canceled]
    );

    fixture.shutdown.cancel();
    let _ = handle.await;
}

#[tokio::test(start_paused = true)]
async fn workers_drain_routines_in_priority_order() {
    let fixture = Fixture::new();
    let trade_sink = RecordingSink::new();
    let seed_sink = RecordingSink::new();
    fixture.submit(1, &trade_sink).await;

    let seed = SubmitRequest::new(
        TradePayload::empty(),
        2u64.into(),
        "Misty",
        RoutineKind::SeedCheck,
        Arc::new(seed_sink.clone()),
    );
    assert!(fixture.service.submit(seed).await.is_accepted());

    let worker = fixture.worker(vec![
        Script::Complete(TradePayload::empty()),
        Script::Complete(TradePayload::empty()),
    ]);
    let handle = tokio::spawn(worker.run());

    while fixture.queues.total_len() > 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert_eq!(
        trade_sink.kinds(),
        vec![RecordedEvent::Initialize, RecordedEvent::Finished]
    );
    assert_eq!(
        seed_sink.kinds(),
        vec![RecordedEvent::Initialize, RecordedEvent::Finished]
    );

    fixture.shutdown.cancel();
    let _ = handle.await;
}
