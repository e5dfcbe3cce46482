use anyhow::{anyhow, Result};
use livemap_client::{
    HttpTransport, MemorySurface, PublicApi, SessionEvent, SessionId,
    SubscriptionController, PLACES_LAYER_ID,
};
use livemap_entities::{geo::MapBbox, language::Language};
use tokio::runtime::Handle;

pub struct WatchOptions {
    pub api_url: String,
    pub bbox: MapBbox,
    pub lang: Option<Language>,
    pub source_lang: Language,
    pub target_lang: Language,
}

/// Subscribe to a viewport and print every rendered generation.
///
/// Blocks until the stream fails or the server goes away.
/// Must not be called from within the async `runtime`.
pub fn watch(options: WatchOptions, runtime: Handle) -> Result<()> {
    let WatchOptions {
        api_url,
        bbox,
        lang,
        source_lang,
        target_lang,
    } = options;
    let (transport, mut events) = HttpTransport::new(PublicApi::new(api_url), runtime)?;
    let mut controller =
        SubscriptionController::new(transport, MemorySurface::default(), source_lang, target_lang);
    if let Some(lang) = lang {
        controller.set_language(lang);
    }
    info!("Watching {bbox} in '{}'", controller.language());
    controller.viewport_settled(bbox);
    while let Some((id, event)) = events.blocking_recv() {
        if !process(&mut controller, id, event) {
            continue;
        }
        if controller.active_session().is_none() {
            return Err(anyhow!("Session {id} has been closed"));
        }
    }
    Ok(())
}

fn process(
    controller: &mut SubscriptionController<HttpTransport, MemorySurface>,
    id: SessionId,
    event: SessionEvent,
) -> bool {
    let rendered = matches!(event, SessionEvent::Message(_));
    if !controller.handle(id, event) {
        return false;
    }
    if rendered {
        let labels = controller.surface().labels(PLACES_LAYER_ID);
        println!("--- {} feature(s) ---", labels.len());
        for label in labels {
            println!("{label}");
        }
    }
    true
}
