use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use rocket::{
    response::stream::{Event, EventStream},
    tokio::{
        self,
        time::{self, Instant, Interval, MissedTickBehavior},
    },
    Shutdown,
};
use uuid::Uuid;

use super::*;

/// Number of currently open streaming sessions.
#[derive(Debug, Default, Clone)]
pub struct OpenSessions(Arc<AtomicUsize>);

impl OpenSessions {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloseReason {
    ClientDisconnected,
    Shutdown,
    Failed,
}

/// The server side of a single viewport subscription.
///
/// A session pushes exactly one feature collection and then
/// only heartbeats until the client goes away. The heartbeat
/// timer is owned by the session and dropped with it.
struct Session {
    id: Uuid,
    heartbeat: Interval,
    close_reason: CloseReason,
    open_sessions: OpenSessions,
}

impl Session {
    fn open(
        query: &usecases::ViewportQuery,
        heartbeat_interval: Duration,
        open_sessions: OpenSessions,
    ) -> Self {
        let id = Uuid::new_v4();
        let count = open_sessions.0.fetch_add(1, Ordering::AcqRel) + 1;
        info!(
            "Session {id} opened for bbox {} in '{}' ({count} open)",
            query.bbox, query.lang
        );
        // The first tick would complete immediately
        let mut heartbeat = time::interval_at(Instant::now() + heartbeat_interval, heartbeat_interval);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            id,
            heartbeat,
            close_reason: CloseReason::ClientDisconnected,
            open_sessions,
        }
    }

    fn pushed(&self, collection: &FeatureCollection) {
        info!(
            "Session {}: pushed {} feature(s) in '{}'",
            self.id,
            collection.len(),
            collection.lang
        );
    }

    fn fail(&mut self, err: &ApiError) {
        warn!("Session {}: {err}", self.id);
        self.close_reason = CloseReason::Failed;
    }

    fn shut_down(&mut self) {
        self.close_reason = CloseReason::Shutdown;
    }

    async fn heartbeat(&mut self) {
        self.heartbeat.tick().await;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let remaining = self.open_sessions.0.fetch_sub(1, Ordering::AcqRel) - 1;
        info!(
            "Session {} closed: {:?} ({remaining} open)",
            self.id, self.close_reason
        );
    }
}

#[get("/places-stream?<bbox>&<lang>")]
pub fn get_places_stream(
    db: sqlite::Connections,
    translation: &State<Translation>,
    open_sessions: &State<OpenSessions>,
    cfg: &State<Cfg>,
    bbox: Option<&str>,
    lang: Option<&str>,
    mut shutdown: Shutdown,
) -> result::Result<EventStream![], ApiError> {
    let query = usecases::parse_viewport_query(bbox, lang, &cfg.source_lang)?;
    let translation = Arc::clone(&translation.0);
    let open_sessions = open_sessions.inner().clone();
    let source_lang = cfg.source_lang.clone();
    let heartbeat_interval = cfg.heartbeat_interval;
    let query_timeout = cfg.query_timeout;
    Ok(EventStream! {
        let mut session = Session::open(&query, heartbeat_interval, open_sessions);
        let pass = load_feature_collection_within(db, translation, source_lang, query, query_timeout);
        let loaded = tokio::select! {
            res = pass => Some(res),
            _ = &mut shutdown => None,
        };
        match loaded {
            Some(Ok(collection)) => {
                session.pushed(&collection);
                yield Event::json(&json::FeatureCollection::from(&collection));
                loop {
                    let shutting_down = tokio::select! {
                        _ = session.heartbeat() => false,
                        _ = &mut shutdown => true,
                    };
                    if shutting_down {
                        session.shut_down();
                        break;
                    }
                    yield Event::data("{}").event("ping");
                }
            }
            Some(Err(err)) => {
                session.fail(&err);
                yield Event::json(&json::StreamError { error: err.to_string() });
            }
            None => session.shut_down(),
        }
    }
    .heartbeat(None))
}
