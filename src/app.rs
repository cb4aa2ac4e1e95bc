//! Composition root: wires queues, workers, and the operator console.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::adapter::console::Console;
use crate::adapter::device::LoopbackDevice;
use crate::adapter::notifier::{ChannelSink, OutboundMessage};
use crate::config::Config;
use crate::domain::{RequesterId, RoutineKind};
use crate::port::AcceptAllValidator;
use crate::queue::QueueManager;
use crate::service::{ActiveTrades, SubmitService, TradeWorker};

pub struct App;

impl App {
    /// Run the bot until the console quits or shutdown is requested.
    pub async fn run(config: Config) -> Result<()> {
        let queues = Arc::new(QueueManager::new());
        let active = Arc::new(ActiveTrades::new());
        let shutdown = CancellationToken::new();

        let (outbox, inbox) = mpsc::unbounded_channel();
        let sink = Arc::new(ChannelSink::new(
            outbox,
            config.queue.return_traded_payload,
        ));
        let printer = tokio::spawn(print_outbound(inbox));

        let service = Arc::new(SubmitService::new(
            Arc::clone(&queues),
            Arc::new(AcceptAllValidator),
            config.queue.estimator(),
        ));

        let mut workers = Vec::with_capacity(config.queue.worker_count);
        for index in 0..config.queue.worker_count {
            let device = Arc::new(LoopbackDevice::new(
                format!("loopback-{index}"),
                "Linkbot",
                Duration::from_secs(2),
            ));
            let worker = TradeWorker::new(
                device,
                Arc::clone(&queues),
                RoutineKind::ALL.to_vec(),
                Arc::clone(&active),
                shutdown.clone(),
                Duration::from_millis(config.queue.idle_poll_ms),
            );
            workers.push(tokio::spawn(worker.run()));
        }
        info!(worker_count = config.queue.worker_count, "workers online");

        let console = Console::new(
            service,
            active,
            sink,
            RequesterId::new(1),
            "Operator",
            shutdown.clone(),
        );
        console.run().await;

        shutdown.cancel();
        for worker in workers {
            let _ = worker.await;
        }
        printer.abort();
        Ok(())
    }
}

async fn print_outbound(mut inbox: mpsc::UnboundedReceiver<OutboundMessage>) {
    while let Some(message) = inbox.recv().await {
        println!("[to {}] {}", message.recipient, message.body);
    }
}
