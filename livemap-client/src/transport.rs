use std::{collections::HashMap, fmt};

use livemap_entities::{feature::FeatureCollection, geo::MapBbox, language::Language};
use reqwest::{header, Client};
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use crate::{
    sse::{EventParser, RawEvent},
    Error, PublicApi, Result,
};

const PING_EVENT: &str = "ping";

/// Identifies a single stream opened by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Message(FeatureCollection),
    Heartbeat,
    Failed(Error),
}

/// Opens and closes viewport streams.
///
/// Implementations deliver the events of a stream tagged
/// with its [`SessionId`] through their own channel.
pub trait StreamTransport {
    fn open(&mut self, id: SessionId, bbox: &MapBbox, lang: &Language);
    fn close(&mut self, id: SessionId);
}

/// Interpret a received event.
pub fn decode_event(raw: RawEvent) -> Result<SessionEvent> {
    let RawEvent { event, data } = raw;
    if event.as_deref() == Some(PING_EVENT) {
        return Ok(SessionEvent::Heartbeat);
    }
    let value: serde_json::Value =
        serde_json::from_str(&data).map_err(|err| Error::Decode(err.to_string()))?;
    if value.get("error").is_some() {
        let livemap_boundary::StreamError { error } =
            serde_json::from_value(value).map_err(|err| Error::Decode(err.to_string()))?;
        return Ok(SessionEvent::Failed(Error::Stream(error)));
    }
    let collection: livemap_boundary::FeatureCollection =
        serde_json::from_value(value).map_err(|err| Error::Decode(err.to_string()))?;
    let collection = collection
        .try_into()
        .map_err(|err: livemap_boundary::ConversionError| Error::Decode(err.to_string()))?;
    Ok(SessionEvent::Message(collection))
}

/// Streams over HTTP, one task per session on an async runtime.
///
/// Closing a session aborts its task which drops the connection.
pub struct HttpTransport {
    api: PublicApi,
    client: Client,
    runtime: Handle,
    events: UnboundedSender<(SessionId, SessionEvent)>,
    sessions: HashMap<SessionId, JoinHandle<()>>,
}

impl HttpTransport {
    /// Streams are read by tasks spawned on `runtime`.
    pub fn new(
        api: PublicApi,
        runtime: Handle,
    ) -> Result<(Self, UnboundedReceiver<(SessionId, SessionEvent)>)> {
        let client = Client::builder().build()?;
        let (events, rx) = mpsc::unbounded_channel();
        let transport = Self {
            api,
            client,
            runtime,
            events,
            sessions: HashMap::new(),
        };
        Ok((transport, rx))
    }

    /// Number of sessions whose connection is still in use.
    pub fn running_sessions(&self) -> usize {
        self.sessions.values().filter(|t| !t.is_finished()).count()
    }
}

async fn read_stream(
    client: Client,
    url: String,
    id: SessionId,
    events: &UnboundedSender<(SessionId, SessionEvent)>,
) -> Result<()> {
    let mut response = client
        .get(&url)
        .header(header::ACCEPT, "text/event-stream")
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(response.json::<livemap_boundary::Error>().await?.into());
    }
    let mut parser = EventParser::new();
    while let Some(chunk) = response.chunk().await? {
        for raw in parser.feed(&chunk) {
            let event = decode_event(raw)?;
            let failed = matches!(event, SessionEvent::Failed(_));
            if events.send((id, event)).is_err() || failed {
                // Nobody is listening anymore
                return Ok(());
            }
        }
    }
    Err(Error::Fetch("Stream ended unexpectedly".into()))
}

impl StreamTransport for HttpTransport {
    fn open(&mut self, id: SessionId, bbox: &MapBbox, lang: &Language) {
        self.sessions.retain(|_, task| !task.is_finished());
        let url = self.api.places_stream_url(bbox, lang);
        let client = self.client.clone();
        let events = self.events.clone();
        log::debug!("Opening session {id}: {url}");
        let task = self.runtime.spawn(async move {
            if let Err(err) = read_stream(client, url, id, &events).await {
                let _ = events.send((id, SessionEvent::Failed(err)));
            }
            log::debug!("Session {id} finished");
        });
        self.sessions.insert(id, task);
    }

    fn close(&mut self, id: SessionId) {
        if let Some(task) = self.sessions.remove(&id) {
            task.abort();
            log::debug!("Closed session {id}");
        }
    }
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        for task in self.sessions.values() {
            task.abort();
        }
    }
}
