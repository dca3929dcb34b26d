//! Broadcast of language switches to unrelated page logic.

use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChanged {
    pub language: String,
}

#[derive(Debug, Default)]
pub struct LanguageNotifier {
    subscribers: Vec<UnboundedSender<LanguageChanged>>,
}

impl LanguageNotifier {
    pub fn subscribe(&mut self) -> UnboundedReceiver<LanguageChanged> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Send to every live subscriber; dropped receivers are pruned.
    pub fn notify(&mut self, event: &LanguageChanged) {
        self.subscribers
            .retain(|tx| tx.unbounded_send(event.clone()).is_ok());
    }
}
