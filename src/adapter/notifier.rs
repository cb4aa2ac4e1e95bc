//! Renders lifecycle events into outbound chat messages.
//!
//! This is the presentation side of the notifier contract: the queue core
//! hands us entries and events, we produce plain text addressed to the
//! requester and push it onto a channel the chat layer drains. Wording
//! follows the bot's established phrasing so requesters see familiar
//! messages regardless of platform.

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::{RequesterId, SeedSearchReport, TradeEntry, TradeKind, TradePayload};
use crate::port::TradeStatusSink;

/// One message addressed to a requester, ready for the chat layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: RequesterId,
    pub body: String,
}

impl OutboundMessage {
    pub fn new(recipient: RequesterId, body: impl Into<String>) -> Self {
        Self {
            recipient,
            body: body.into(),
        }
    }
}

/// Sink that renders events as [`OutboundMessage`]s on an unbounded channel.
///
/// Delivery failure (the chat layer dropped its receiver) is logged and
/// swallowed; a failed notification never unwinds queue state.
pub struct ChannelSink {
    outbox: mpsc::UnboundedSender<OutboundMessage>,
    echo_returns: bool,
}

impl ChannelSink {
    /// `echo_returns` mirrors the config flag for sending back what the
    /// requester traded in.
    #[must_use]
    pub fn new(outbox: mpsc::UnboundedSender<OutboundMessage>, echo_returns: bool) -> Self {
        Self {
            outbox,
            echo_returns,
        }
    }

    fn send(&self, recipient: RequesterId, body: String) {
        if self.outbox.send(OutboundMessage::new(recipient, body)).is_err() {
            warn!(%recipient, "chat outbox closed; dropping notification");
        }
    }
}

impl TradeStatusSink for ChannelSink {
    fn on_initialize(&self, entry: &TradeEntry) {
        self.send(entry.requester(), initialize_message(entry));
    }

    fn on_searching(&self, entry: &TradeEntry, in_game_name: &str) {
        self.send(entry.requester(), searching_message(entry, in_game_name));
    }

    fn on_canceled(&self, entry: &TradeEntry, reason: &str) {
        self.send(entry.requester(), format!("Trade canceled: {reason}"));
    }

    fn on_finished(&self, entry: &TradeEntry, received: &TradePayload) {
        self.send(entry.requester(), finished_message(entry));

        let echo = self.echo_returns || entry.kind() == TradeKind::Dump;
        if echo && !received.is_empty() {
            self.send(
                entry.requester(),
                format!("Here's what you traded me: {received}!"),
            );
        }
    }

    fn on_notify(&self, entry: &TradeEntry, message: &str) {
        self.send(entry.requester(), message.to_string());
    }

    fn on_report(&self, entry: &TradeEntry, report: &SeedSearchReport) {
        self.send(
            entry.requester(),
            format!("Here are the details for `{}`:\n{report}", report.seed_hex()),
        );
    }
}

fn receive_suffix(entry: &TradeEntry) -> String {
    if entry.payload().is_empty() {
        String::new()
    } else {
        format!(" ({})", entry.payload().display_name())
    }
}

fn initialize_message(entry: &TradeEntry) -> String {
    let receive = receive_suffix(entry);

    if let Some(visual) = entry.visual_code() {
        return format!(
            "Initializing trade{receive}. Please be ready. Your code is {visual}."
        );
    }

    let batch = entry.batch();
    let batch_info = if batch.is_batch() {
        format!(" (Trade {} of {})", batch.index(), batch.total())
    } else {
        String::new()
    };

    let mut message = format!(
        "Initializing trade{receive}{batch_info}. Please be ready. Your code is **{}**.",
        entry.code()
    );
    if batch.is_batch() && batch.is_first() {
        message.push_str("\nPlease stay in the trade until all batch trades are completed.");
    }
    message
}

fn searching_message(entry: &TradeEntry, in_game_name: &str) -> String {
    let batch = entry.batch();
    let trainer = entry.trainer().name();
    let trainer = if trainer.is_empty() {
        String::new()
    } else {
        format!(" {trainer}")
    };
    let batch_info = if batch.is_batch() {
        format!(" for batch trade (Trade {} of {})", batch.index(), batch.total())
    } else {
        String::new()
    };

    if entry.visual_code().is_some() {
        return format!(
            "I'm waiting for you{trainer}{batch_info}! My in-game name is **{in_game_name}**."
        );
    }

    if batch.is_batch() && !batch.is_first() {
        let receive = receive_suffix(entry);
        return format!(
            "Now trading{receive} (Trade {} of {}). Select what you wish to trade!",
            batch.index(),
            batch.total()
        );
    }

    format!(
        "I'm waiting for you{trainer}{batch_info}! Please be ready. Your code is **{}**.",
        entry.code()
    )
}

fn finished_message(entry: &TradeEntry) -> String {
    if entry.payload().is_empty() {
        return "Trade finished!".to_string();
    }
    if entry.flags().mystery_egg {
        return "Trade finished. Enjoy your **Mystery Egg**!".to_string();
    }
    format!(
        "Trade finished. Enjoy your **{}**!",
        entry.payload().species_name()
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{BatchInfo, EntryFlags, RoutineKind};
    use crate::testkit::domain::{entry_builder, payload};

    fn sink_pair(echo: bool) -> (Arc<ChannelSink>, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(ChannelSink::new(tx, echo)), rx)
    }

    #[test]
    fn initialize_presents_grouped_code() {
        let (sink, mut rx) = sink_pair(false);
        let entry = entry_builder(1, RoutineKind::LinkTrade)
            .payload(payload(25, "Pikachu"))
            .code(12_345_678)
            .build(sink.clone());

        sink.on_initialize(&entry);
        let msg = rx.try_recv().unwrap();
        assert_eq!(msg.recipient, entry.requester());
        assert!(msg.body.contains("Initializing trade (Pikachu)"));
        assert!(msg.body.contains("**1234 5678**"));
    }

    #[test]
    fn first_batch_item_warns_to_stay_in_trade() {
        let (sink, mut rx) = sink_pair(false);
        let entry = entry_builder(1, RoutineKind::LinkTrade)
            .payload(payload(25, "Pikachu"))
            .batch(BatchInfo::new(1, 3).unwrap())
            .build(sink.clone());

        sink.on_initialize(&entry);
        let body = rx.try_recv().unwrap().body;
        assert!(body.contains("(Trade 1 of 3)"));
        assert!(body.contains("stay in the trade"));
    }

    #[test]
    fn later_batch_items_announce_the_next_offer() {
        let (sink, mut rx) = sink_pair(false);
        let entry = entry_builder(1, RoutineKind::LinkTrade)
            .payload(payload(133, "Eevee"))
            .batch(BatchInfo::new(2, 3).unwrap())
            .build(sink.clone());

        sink.on_searching(&entry, "Bot");
        let body = rx.try_recv().unwrap().body;
        assert!(body.starts_with("Now trading (Eevee) (Trade 2 of 3)"));
        assert!(!body.contains("code"));
    }

    #[test]
    fn visual_code_replaces_numeric_code() {
        let (sink, mut rx) = sink_pair(false);
        let entry = entry_builder(1, RoutineKind::LinkTrade)
            .payload(payload(25, "Pikachu").with_visual_code_support())
            .build(sink.clone());

        sink.on_initialize(&entry);
        let body = rx.try_recv().unwrap().body;
        assert!(!body.contains("**0000"), "numeric code must not appear: {body}");
    }

    #[test]
    fn mystery_egg_gets_its_own_finish_message() {
        let (sink, mut rx) = sink_pair(false);
        let entry = entry_builder(1, RoutineKind::LinkTrade)
            .payload(payload(25, "Pikachu"))
            .flags(EntryFlags {
                mystery_egg: true,
                ..EntryFlags::default()
            })
            .build(sink.clone());

        sink.on_finished(&entry, &TradePayload::empty());
        let body = rx.try_recv().unwrap().body;
        assert!(body.contains("Mystery Egg"));
    }

    #[test]
    fn echo_flag_returns_the_traded_payload() {
        let (sink, mut rx) = sink_pair(true);
        let entry = entry_builder(1, RoutineKind::LinkTrade)
            .payload(payload(25, "Pikachu"))
            .build(sink.clone());

        sink.on_finished(&entry, &payload(132, "Ditto"));
        let first = rx.try_recv().unwrap().body;
        assert!(first.contains("Enjoy your **Pikachu**"));
        let second = rx.try_recv().unwrap().body;
        assert!(second.contains("Ditto"));
    }

    #[test]
    fn seed_report_renders_as_a_block() {
        let (sink, mut rx) = sink_pair(false);
        let entry = entry_builder(1, RoutineKind::SeedCheck).build(sink.clone());

        let report = SeedSearchReport::new(
            0x1234,
            vec![crate::domain::ReportDetail::new("Frame", "77")],
        );
        sink.on_report(&entry, &report);
        let body = rx.try_recv().unwrap().body;
        assert!(body.contains("0000000000001234"));
        assert!(body.contains("Frame: 77"));
    }
}
