//! Line-based operator console.
//!
//! Reads commands from stdin and drives the submit service, standing in for
//! a chat frontend. Each console session acts as a single requester, so the
//! admission rules (duplicate rejection included) are observable
//! interactively.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::domain::{BatchInfo, RequesterId, RoutineKind, TradePayload};
use crate::port::TradeStatusSink;
use crate::service::{ActiveTrades, SubmitOutcome, SubmitRequest, SubmitService};

const HELP: &str = "\
commands:
  trade <species-id> <species-name> [code]   queue a link trade
  batch <count> <species-id> <species-name>  queue a batch of trades
  seed                                       queue a seed check
  dump                                       queue a dump session
  status [trade|clone|dump|fixot|seed]       show queue position
  cancel [trade|clone|dump|fixot|seed]       drop your pending request
  help                                       show this text
  quit                                       shut down";

pub struct Console {
    service: Arc<SubmitService>,
    active: Arc<ActiveTrades>,
    sink: Arc<dyn TradeStatusSink>,
    requester: RequesterId,
    trainer_name: String,
    shutdown: CancellationToken,
}

impl Console {
    #[must_use]
    pub fn new(
        service: Arc<SubmitService>,
        active: Arc<ActiveTrades>,
        sink: Arc<dyn TradeStatusSink>,
        requester: RequesterId,
        trainer_name: impl Into<String>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            service,
            active,
            sink,
            requester,
            trainer_name: trainer_name.into(),
            shutdown,
        }
    }

    /// Read and dispatch lines until EOF, `quit`, or shutdown.
    pub async fn run(self) {
        println!("{HELP}");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = tokio::select! {
                () = self.shutdown.cancelled() => break,
                line = lines.next_line() => line,
            };
            match line {
                Ok(Some(line)) => {
                    if !self.dispatch(line.trim()).await {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    error!(error = %err, "failed to read console input");
                    break;
                }
            }
        }
        self.shutdown.cancel();
    }

    /// Returns false when the console should exit.
    async fn dispatch(&self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return true;
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "trade" => self.cmd_trade(&args).await,
            "batch" => self.cmd_batch(&args).await,
            "seed" => self.cmd_routine(RoutineKind::SeedCheck).await,
            "dump" => self.cmd_routine(RoutineKind::Dump).await,
            "status" => self.cmd_status(&args),
            "cancel" => self.cmd_cancel(&args),
            "help" => println!("{HELP}"),
            "quit" | "exit" => return false,
            other => println!("unknown command: {other} (try `help`)"),
        }
        true
    }

    async fn cmd_trade(&self, args: &[&str]) {
        let (Some(species), Some(name)) = (args.first(), args.get(1)) else {
            println!("usage: trade <species-id> <species-name> [code]");
            return;
        };
        let Ok(species) = species.parse::<u16>() else {
            println!("species-id must be a number");
            return;
        };

        let mut request = SubmitRequest::new(
            TradePayload::new(species, *name),
            self.requester,
            self.trainer_name.clone(),
            RoutineKind::LinkTrade,
            Arc::clone(&self.sink),
        );
        if let Some(code) = args.get(2) {
            match code.parse::<u32>() {
                Ok(code) => request = request.with_code(code),
                Err(_) => {
                    println!("code must be a number up to 8 digits");
                    return;
                }
            }
        }
        self.report_outcome(self.service.submit(request).await);
    }

    async fn cmd_batch(&self, args: &[&str]) {
        let (Some(count), Some(species), Some(name)) =
            (args.first(), args.get(1), args.get(2))
        else {
            println!("usage: batch <count> <species-id> <species-name>");
            return;
        };
        let (Ok(count), Ok(species)) = (count.parse::<u16>(), species.parse::<u16>()) else {
            println!("count and species-id must be numbers");
            return;
        };
        if count < 2 {
            println!("a batch needs at least 2 trades");
            return;
        }

        for index in 1..=count {
            let Some(batch) = BatchInfo::new(index, count) else {
                break;
            };
            let request = SubmitRequest::new(
                TradePayload::new(species, *name),
                self.requester,
                self.trainer_name.clone(),
                RoutineKind::LinkTrade,
                Arc::clone(&self.sink),
            )
            .with_batch(batch);
            self.report_outcome(self.service.submit(request).await);
        }
    }

    async fn cmd_routine(&self, routine: RoutineKind) {
        let kind = match routine {
            RoutineKind::Dump => crate::domain::TradeKind::Dump,
            RoutineKind::SeedCheck => crate::domain::TradeKind::Seed,
            _ => crate::domain::TradeKind::Specific,
        };
        let request = SubmitRequest::new(
            TradePayload::empty(),
            self.requester,
            self.trainer_name.clone(),
            routine,
            Arc::clone(&self.sink),
        )
        .with_kind(kind);
        self.report_outcome(self.service.submit(request).await);
    }

    fn cmd_status(&self, args: &[&str]) {
        let routine = parse_routine(args.first().copied());
        let check = self.service.check_status(self.requester, routine);
        println!("{}", check.summary());
    }

    fn cmd_cancel(&self, args: &[&str]) {
        let routine = parse_routine(args.first().copied());
        if self.service.cancel_pending(self.requester, routine) {
            println!("pending request removed");
            return;
        }
        // Not pending; maybe a worker already claimed it.
        if let Some(entry) = self.service.queues().find(self.requester, routine) {
            if self.active.cancel(entry.id()) {
                println!("cancellation requested for the running trade");
                return;
            }
        }
        println!("nothing to cancel in the {routine} queue");
    }

    fn report_outcome(&self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Accepted(acceptance) => {
                println!(
                    "added as trade {} at position {} (about {:.1} min); code {}",
                    acceptance.trade_id,
                    acceptance.position,
                    acceptance.eta_minutes,
                    acceptance.code,
                );
            }
            SubmitOutcome::Rejected(err) => println!("rejected: {err}"),
        }
    }
}

fn parse_routine(arg: Option<&str>) -> RoutineKind {
    match arg {
        Some("clone") => RoutineKind::Clone,
        Some("dump") => RoutineKind::Dump,
        Some("fixot") => RoutineKind::FixOt,
        Some("seed") => RoutineKind::SeedCheck,
        _ => RoutineKind::LinkTrade,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routine_names_map_to_partitions() {
        assert_eq!(parse_routine(Some("seed")), RoutineKind::SeedCheck);
        assert_eq!(parse_routine(Some("fixot")), RoutineKind::FixOt);
        assert_eq!(parse_routine(None), RoutineKind::LinkTrade);
        assert_eq!(parse_routine(Some("bogus")), RoutineKind::LinkTrade);
    }
}
