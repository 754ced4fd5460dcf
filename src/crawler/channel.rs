//! Page channel between the fetch and parse stages
//!
//! Many fetch workers push snapshots; one parse coordinator reads them. The
//! stream ends with exactly one [`PageMessage::End`], sent by consuming the
//! coordinator's [`PageSender`] through [`PageSender::finish`].

use tokio::sync::mpsc;

/// Markup of one rendered results page and the URL it was rendered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub source_url: String,
    pub markup: String,
}

/// A message on the page channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMessage {
    Page(PageSnapshot),
    /// No more pages will follow
    End,
}

/// Creates a connected sender/receiver pair
pub fn page_channel() -> (PageSender, PageReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PageSender { tx }, PageReceiver { rx })
}

/// Producer side of the page channel; cheap to clone, one per worker
#[derive(Debug, Clone)]
pub struct PageSender {
    tx: mpsc::UnboundedSender<PageMessage>,
}

impl PageSender {
    /// Queues a snapshot; returns false if the reader has gone away
    pub fn push(&self, snapshot: PageSnapshot) -> bool {
        self.tx.send(PageMessage::Page(snapshot)).is_ok()
    }

    /// Terminates the stream
    ///
    /// Consumes the sender, so one handle can emit at most one end marker.
    /// Only the fetch coordinator calls this, after every worker has exited.
    pub fn finish(self) {
        if self.tx.send(PageMessage::End).is_err() {
            tracing::debug!("Page reader dropped before end of stream");
        }
    }
}

/// Consumer side of the page channel
#[derive(Debug)]
pub struct PageReceiver {
    rx: mpsc::UnboundedReceiver<PageMessage>,
}

impl PageReceiver {
    /// Waits for the next message
    ///
    /// Returns `None` once every sender is gone. A well-behaved stream always
    /// delivers [`PageMessage::End`] before that happens.
    pub async fn recv(&mut self) -> Option<PageMessage> {
        self.rx.recv().await
    }
}
