//! Incremental parser for `text/event-stream` bodies.

/// A dispatched event before any interpretation of its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// `None` for the default `message` type.
    pub event: Option<String>,
    pub data: String,
}

#[derive(Debug, Default)]
pub struct EventParser {
    pending: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the next chunk of the body.
    ///
    /// Chunks may end anywhere, even within a multi-byte character.
    /// Returns all events completed by this chunk.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<RawEvent> {
        self.pending.extend_from_slice(chunk);
        let mut events = vec![];
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let bytes: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&bytes[..pos]);
            let line = text.strip_suffix('\r').unwrap_or(&text);
            if let Some(event) = self.process_line(line) {
                events.push(event);
            }
        }
        events
    }

    fn process_line(&mut self, line: &str) -> Option<RawEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            // comment
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_owned()),
            "data" => self.data.push(value.to_owned()),
            // id and retry are irrelevant here
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<RawEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = self.data.join("\n");
        self.data.clear();
        Some(RawEvent {
            event: event.filter(|e| !e.is_empty() && e != "message"),
            data,
        })
    }
}
