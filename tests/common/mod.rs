use async_trait::async_trait;
use hostbot::runtime::{
    EventStream, FinishReason, GeminiModel, GenerateRequest, ModelProvider, RuntimeError,
    StreamEvent, UsageMetadata,
};
use hostbot::state::AppState;
use std::collections::VecDeque;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// App shell served for non-API GET requests
pub const INDEX_HTML: &str = "<!doctype html><title>host app</title>";

/// Bundled asset served under /static
pub const APP_JS: &str = "console.log(\"host app\");";

pub type ScriptedEvents = Vec<Result<StreamEvent, RuntimeError>>;

/// Shared recording of everything the scripted provider saw
pub struct Script {
    turns: Mutex<VecDeque<ScriptedEvents>>,
    pub requests: Mutex<Vec<GenerateRequest>>,
    pub factory_models: Mutex<Vec<GeminiModel>>,
    pub calls: AtomicUsize,
    delay: Option<Duration>,
}

struct ScriptedProvider {
    script: Arc<Script>,
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn stream_generate(
        &self,
        request: GenerateRequest,
    ) -> Result<EventStream, RuntimeError> {
        self.script.calls.fetch_add(1, Ordering::SeqCst);
        self.script.requests.lock().unwrap().push(request);

        if let Some(delay) = self.script.delay {
            tokio::time::sleep(delay).await;
        }

        match self.script.turns.lock().unwrap().pop_front() {
            Some(events) => Ok(Box::pin(futures::stream::iter(events))),
            None => Err(RuntimeError::StreamError("No more responses".to_string())),
        }
    }
}

/// An app wired to a scripted provider, with a web root on disk
pub struct TestApp {
    pub state: Arc<AppState>,
    pub script: Arc<Script>,
    pub static_dir: TempDir,
}

pub async fn spawn_app(turns: Vec<ScriptedEvents>) -> TestApp {
    spawn_app_with(turns, None, None).await
}

/// Spawn an app; `delay` stalls the provider inside each turn and
/// `fail_factory_for` makes provider construction fail for that model.
pub async fn spawn_app_with(
    turns: Vec<ScriptedEvents>,
    delay: Option<Duration>,
    fail_factory_for: Option<GeminiModel>,
) -> TestApp {
    let script = Arc::new(Script {
        turns: Mutex::new(turns.into()),
        requests: Mutex::new(Vec::new()),
        factory_models: Mutex::new(Vec::new()),
        calls: AtomicUsize::new(0),
        delay,
    });

    let factory_script = Arc::clone(&script);
    let factory = Box::new(move |model: GeminiModel| {
        factory_script.factory_models.lock().unwrap().push(model);

        if fail_factory_for == Some(model) {
            return Err(RuntimeError::HttpError {
                status: 0,
                body: "Failed to create HTTP client".to_string(),
            });
        }

        Ok(Box::new(ScriptedProvider {
            script: Arc::clone(&factory_script),
        }) as Box<dyn ModelProvider>)
    });

    let state = AppState::with_provider_factory(factory).expect("Failed to build app state");
    state
        .reset_session()
        .await
        .expect("Failed to open the initial session");

    let static_dir = TempDir::new().expect("Failed to create web root");
    fs::write(static_dir.path().join("index.html"), INDEX_HTML)
        .expect("Failed to write index.html");
    fs::create_dir(static_dir.path().join("static")).expect("Failed to create asset dir");
    fs::write(static_dir.path().join("static").join("app.js"), APP_JS)
        .expect("Failed to write app.js");

    TestApp {
        state,
        script,
        static_dir,
    }
}

/// One full text turn ending in a final response
pub fn text_turn(deltas: &[&str]) -> ScriptedEvents {
    let mut events: ScriptedEvents = vec![Ok(StreamEvent::MessageStart {
        id: "msg-1".to_string(),
    })];
    for delta in deltas {
        events.push(Ok(StreamEvent::TextDelta {
            text: delta.to_string(),
        }));
    }
    events.push(Ok(StreamEvent::MessageEnd {
        finish_reason: FinishReason::Stop,
        usage: UsageMetadata::new(10, 5),
    }));
    events
}
