use livemap_entities::{geo::MapBbox, language::Language};

use crate::{LayerReplacer, MapSurface, SessionEvent, SessionId, StreamTransport};

/// Keeps exactly one stream open for the current viewport and language.
///
/// All methods take `&mut self` and must be driven from a single
/// event loop. Closing the previous stream always happens before
/// opening the next one.
pub struct SubscriptionController<T, S>
where
    T: StreamTransport,
    S: MapSurface,
{
    transport: T,
    surface: S,
    replacer: LayerReplacer,
    source_lang: Language,
    target_lang: Language,
    lang: Language,
    viewport: Option<MapBbox>,
    active: Option<SessionId>,
    last_id: u64,
}

impl<T, S> SubscriptionController<T, S>
where
    T: StreamTransport,
    S: MapSurface,
{
    /// Starts in the source language without any session.
    pub fn new(transport: T, surface: S, source_lang: Language, target_lang: Language) -> Self {
        Self {
            transport,
            surface,
            replacer: LayerReplacer::default(),
            lang: source_lang.clone(),
            source_lang,
            target_lang,
            viewport: None,
            active: None,
            last_id: 0,
        }
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.active
    }

    pub fn language(&self) -> &Language {
        &self.lang
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The map has stopped moving.
    pub fn viewport_settled(&mut self, bbox: MapBbox) {
        self.viewport = Some(bbox);
        self.resubscribe();
    }

    pub fn set_language(&mut self, lang: Language) {
        if lang == self.lang {
            return;
        }
        self.lang = lang;
        self.resubscribe();
    }

    /// Switch between the source and the target language.
    pub fn toggle_language(&mut self) -> &Language {
        let next = if self.lang == self.source_lang {
            self.target_lang.clone()
        } else {
            self.source_lang.clone()
        };
        self.set_language(next);
        &self.lang
    }

    /// Process an event delivered by the transport.
    ///
    /// Returns `false` if the event belongs to a session that
    /// has already been closed and is therefore discarded.
    pub fn handle(&mut self, id: SessionId, event: SessionEvent) -> bool {
        if self.active != Some(id) {
            log::debug!("Discarding event of stale session {id}");
            return false;
        }
        match event {
            SessionEvent::Message(collection) => {
                self.replacer.replace(&mut self.surface, &collection);
            }
            SessionEvent::Heartbeat => {}
            SessionEvent::Failed(err) => {
                // No retry, the next viewport or language change subscribes again
                log::warn!("Session {id} failed: {err}");
                self.close();
            }
        }
        true
    }

    fn resubscribe(&mut self) {
        self.close();
        let Some(bbox) = self.viewport else {
            return;
        };
        self.last_id += 1;
        let id = SessionId(self.last_id);
        self.transport.open(id, &bbox, &self.lang);
        self.active = Some(id);
    }

    fn close(&mut self) {
        if let Some(id) = self.active.take() {
            self.transport.close(id);
        }
    }
}

impl<T, S> Drop for SubscriptionController<T, S>
where
    T: StreamTransport,
    S: MapSurface,
{
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{Error, MemorySurface, PLACES_LAYER_ID};
    use livemap_entities::{builders::*, feature::*, geo::MapPoint};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Open(SessionId, String),
        Close(SessionId),
    }

    #[derive(Default, Clone)]
    struct FakeTransport {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl FakeTransport {
        fn open_sessions(&self) -> Vec<SessionId> {
            let mut open = vec![];
            for call in self.calls.borrow().iter() {
                match call {
                    Call::Open(id, _) => open.push(*id),
                    Call::Close(id) => open.retain(|x| x != id),
                }
            }
            open
        }
    }

    impl StreamTransport for FakeTransport {
        fn open(&mut self, id: SessionId, bbox: &MapBbox, lang: &Language) {
            self.calls
                .borrow_mut()
                .push(Call::Open(id, format!("{}|{lang}", bbox.to_array().map(|x| x.to_string()).join(","))));
        }
        fn close(&mut self, id: SessionId) {
            self.calls.borrow_mut().push(Call::Close(id));
        }
    }

    fn controller(transport: FakeTransport) -> SubscriptionController<FakeTransport, MemorySurface> {
        SubscriptionController::new(
            transport,
            MemorySurface::default(),
            "en".parse().unwrap(),
            "kn".parse().unwrap(),
        )
    }

    fn collection(lang: &str, name: &str, translated: Option<&str>) -> FeatureCollection {
        let mut feature = Feature::build()
            .id("lalbagh")
            .name(name)
            .pos(MapPoint::from_lat_lng_deg(12.95, 77.585))
            .finish();
        feature.translated_name = translated.map(Into::into);
        FeatureCollection {
            bbox: "77.55,12.90,77.60,12.96".parse().unwrap(),
            lang: lang.parse().unwrap(),
            features: vec![feature],
        }
    }

    #[test]
    fn no_session_without_viewport() {
        let transport = FakeTransport::default();
        let mut c = controller(transport.clone());
        c.toggle_language();
        assert_eq!(c.active_session(), None);
        assert!(transport.calls.borrow().is_empty());
    }

    #[test]
    fn close_before_open() {
        let transport = FakeTransport::default();
        let mut c = controller(transport.clone());
        c.viewport_settled("0,0,1,1".parse().unwrap());
        c.viewport_settled("0,0,2,2".parse().unwrap());
        assert_eq!(
            *transport.calls.borrow(),
            vec![
                Call::Open(SessionId(1), "0,0,1,1|en".into()),
                Call::Close(SessionId(1)),
                Call::Open(SessionId(2), "0,0,2,2|en".into()),
            ]
        );
        assert_eq!(transport.open_sessions(), vec![SessionId(2)]);
        assert_eq!(c.active_session(), Some(SessionId(2)));
    }

    #[test]
    fn late_events_of_closed_sessions_are_discarded() {
        let transport = FakeTransport::default();
        let mut c = controller(transport.clone());
        c.viewport_settled("0,0,1,1".parse().unwrap());
        c.viewport_settled("0,0,2,2".parse().unwrap());
        // The fast response of the new viewport arrives first
        assert!(c.handle(
            SessionId(2),
            SessionEvent::Message(collection("en", "New", None))
        ));
        assert!(!c.handle(
            SessionId(1),
            SessionEvent::Message(collection("en", "Old", None))
        ));
        assert_eq!(c.surface().labels(PLACES_LAYER_ID), vec!["New"]);
    }

    #[test]
    fn toggle_language_resubscribes() {
        let transport = FakeTransport::default();
        let mut c = controller(transport.clone());
        c.viewport_settled("77.55,12.9,77.6,12.96".parse().unwrap());
        assert_eq!(c.toggle_language().as_str(), "kn");
        assert!(c.handle(
            SessionId(2),
            SessionEvent::Message(collection("kn", "Lalbagh", Some("ಲಾಲ್‌ಬಾಗ್")))
        ));
        assert_eq!(c.surface().labels(PLACES_LAYER_ID), vec!["ಲಾಲ್‌ಬಾಗ್"]);
        assert_eq!(c.toggle_language().as_str(), "en");
        assert_eq!(transport.open_sessions(), vec![SessionId(3)]);
        // Setting the current language again changes nothing
        c.set_language("en".parse().unwrap());
        assert_eq!(c.active_session(), Some(SessionId(3)));
    }

    #[test]
    fn heartbeats_change_nothing() {
        let transport = FakeTransport::default();
        let mut c = controller(transport.clone());
        c.viewport_settled("0,0,1,1".parse().unwrap());
        c.handle(SessionId(1), SessionEvent::Message(collection("en", "A", None)));
        let before = c.surface().clone();
        assert!(c.handle(SessionId(1), SessionEvent::Heartbeat));
        assert_eq!(*c.surface(), before);
        assert_eq!(c.active_session(), Some(SessionId(1)));
    }

    #[test]
    fn close_failed_session_without_retry() {
        let transport = FakeTransport::default();
        let mut c = controller(transport.clone());
        c.viewport_settled("0,0,1,1".parse().unwrap());
        c.handle(
            SessionId(1),
            SessionEvent::Failed(Error::Stream("Streaming failed".into())),
        );
        assert_eq!(c.active_session(), None);
        assert!(transport.open_sessions().is_empty());
        assert_eq!(transport.calls.borrow().len(), 2);
        // The next viewport change subscribes again
        c.viewport_settled("0,0,1,1".parse().unwrap());
        assert_eq!(transport.open_sessions(), vec![SessionId(2)]);
    }

    #[test]
    fn close_session_on_drop() {
        let transport = FakeTransport::default();
        let mut c = controller(transport.clone());
        c.viewport_settled("0,0,1,1".parse().unwrap());
        drop(c);
        assert!(transport.open_sessions().is_empty());
    }
}
