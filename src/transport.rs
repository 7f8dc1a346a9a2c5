//! Concrete outbound sinks for pose messages.

use std::io::Write;
use std::sync::mpsc::Sender;

use crate::error::TransportError;
use crate::traits::PoseSink;
use crate::types::ViewerMessage;

/// Writes one JSON document per line, flushing after each message
pub struct JsonLinesSink<W: Write> {
    writer: W,
    sent: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, sent: 0 }
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PoseSink for JsonLinesSink<W> {
    fn send(&mut self, message: &ViewerMessage) -> Result<(), TransportError> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.sent += 1;
        Ok(())
    }
}

/// Hands messages to another thread over an mpsc channel
pub struct ChannelSink {
    sender: Sender<ViewerMessage>,
}

impl ChannelSink {
    pub fn new(sender: Sender<ViewerMessage>) -> Self {
        Self { sender }
    }
}

impl PoseSink for ChannelSink {
    fn send(&mut self, message: &ViewerMessage) -> Result<(), TransportError> {
        self.sender.send(*message).map_err(|_| TransportError::Closed)
    }
}
