// Result channel: wraps the service's push connection as an explicit
// event stream. A single reader thread owns the websocket and emits
// tagged events into an mpsc channel; the orchestrator consumes them
// from one blocking receive point.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use serde::Deserialize;
use tungstenite::Message;

/// The one payload the service pushes: the computed two-party diff in
/// unified-diff text form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiffResult {
    pub diff: String,
}

/// Everything the push connection can report, in the order it can
/// happen. `Connected` fires at most once, before either terminal
/// variant; `ResultReceived` and `Failed` are both terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Connected,
    ResultReceived(DiffResult),
    Failed(String),
}

/// Envelope for text frames pushed by the server.
#[derive(Deserialize)]
struct ServerEvent {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// A connected (or connecting) push channel scoped to one room.
///
/// Construction spawns the reader thread immediately; connection success
/// or failure is reported through the event receiver rather than the
/// constructor, so the caller keeps a single consumption point.
pub struct ResultChannel {
    events: Receiver<ChannelEvent>,
    reader: Option<JoinHandle<()>>,
}

impl ResultChannel {
    /// Open a push connection to `server_url` scoped to `room_id`.
    /// `server_url` is the same HTTP base address used for requests; the
    /// websocket scheme is derived from it.
    pub fn connect(server_url: &str, room_id: &str) -> Self {
        let url = ws_url(server_url, room_id);
        let (tx, events) = mpsc::channel();
        let reader = thread::spawn(move || read_loop(&url, &tx));
        ResultChannel {
            events,
            reader: Some(reader),
        }
    }

    /// Receiver for the channel's events.
    pub fn events(&self) -> &Receiver<ChannelEvent> {
        &self.events
    }

    /// Close the channel after a result has been consumed, waiting for
    /// the reader thread to finish its close handshake.
    pub fn close(mut self) {
        if let Some(handle) = self.reader.take() {
            let _ = handle.join();
        }
    }
}

/// Derive the websocket URL for a room from the service's HTTP address.
fn ws_url(server_url: &str, room_id: &str) -> String {
    let base = server_url.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if base.starts_with("ws://") || base.starts_with("wss://") {
        base.to_string()
    } else {
        format!("ws://{base}")
    };
    format!("{}/?roomId={}", base, urlencoding::encode(room_id))
}

/// Connect and pump events until a diff result arrives or the connection
/// dies. Send failures mean the consumer is gone (process exiting), so
/// they are ignored.
fn read_loop(url: &str, tx: &Sender<ChannelEvent>) {
    let mut socket = match tungstenite::connect(url) {
        Ok((socket, _response)) => socket,
        Err(err) => {
            let _ = tx.send(ChannelEvent::Failed(err.to_string()));
            return;
        }
    };
    let _ = tx.send(ChannelEvent::Connected);

    loop {
        match socket.read() {
            Ok(Message::Text(text)) => {
                if let Some(result) = parse_diff_result(&text) {
                    let _ = tx.send(ChannelEvent::ResultReceived(result));
                    // Consumer is done with the connection; complete the
                    // close handshake before the thread exits.
                    let _ = socket.close(None);
                    while socket.read().is_ok() {}
                    return;
                }
            }
            Ok(Message::Close(_)) => {
                let _ = tx.send(ChannelEvent::Failed(
                    "connection closed before a diff result arrived".to_string(),
                ));
                return;
            }
            // Pings are answered internally by the socket; other frame
            // types carry nothing for us.
            Ok(_) => {}
            Err(err) => {
                let _ = tx.send(ChannelEvent::Failed(err.to_string()));
                return;
            }
        }
    }
}

/// Parse a text frame into a diff result, if that is what it carries.
/// Unknown events and malformed frames are skipped.
fn parse_diff_result(text: &str) -> Option<DiffResult> {
    let envelope: ServerEvent = serde_json::from_str(text).ok()?;
    if envelope.event != "diff_result" {
        return None;
    }
    serde_json::from_value(envelope.data).ok()
}
