//! Shared test doubles: an in-memory TTL store and fixed-output
//! collaborators, wired into the real router on an ephemeral port.

use animal_quiz::{
    domain::{ImageProvider, ResultStore, ResultSynthesizer},
    errors::{ImageError, StoreError, SynthesisError},
    handlers::AppState,
    models::{StoredResult, SynthesizedResult},
    routes::create_router,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::time::Instant;
use uuid::Uuid;

type Entry = (StoredResult, Option<Vec<u8>>, Instant);

/// TTL-capable in-memory store. Uses `tokio::time::Instant` so tests with a
/// paused clock can advance past expiry deterministically.
#[derive(Default)]
pub struct InMemoryResultStore {
    entries: Mutex<HashMap<Uuid, Entry>>,
    offline: AtomicBool,
}

impl InMemoryResultStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Simulate an unreachable backend for subsequent operations.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn record_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable(anyhow::anyhow!(
                "in-memory store marked offline"
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn put(
        &self,
        id: Uuid,
        fields: &StoredResult,
        image: Option<&[u8]>,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        self.check_online()?;
        self.entries.lock().unwrap().insert(
            id,
            (fields.clone(), image.map(|b| b.to_vec()), Instant::now() + ttl),
        );
        Ok(())
    }

    async fn get_fields(&self, id: Uuid) -> Result<Option<StoredResult>, StoreError> {
        self.check_online()?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&id)
            .filter(|(_, _, expires_at)| Instant::now() < *expires_at)
            .map(|(fields, _, _)| fields.clone()))
    }

    async fn get_image(&self, id: Uuid) -> Result<Option<Vec<u8>>, StoreError> {
        self.check_online()?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&id)
            .filter(|(_, _, expires_at)| Instant::now() < *expires_at)
            .and_then(|(_, image, _)| image.clone()))
    }
}

pub enum FakeSynthesizer {
    Fixed(SynthesizedResult),
    Failing,
}

#[async_trait]
impl ResultSynthesizer for FakeSynthesizer {
    async fn synthesize(&self, _answers: &[String]) -> Result<SynthesizedResult, SynthesisError> {
        match self {
            FakeSynthesizer::Fixed(result) => Ok(result.clone()),
            FakeSynthesizer::Failing => Err(SynthesisError::MalformedOutput(
                "fake synthesizer configured to fail".into(),
            )),
        }
    }
}

pub enum FakeImageProvider {
    Fixed(Vec<u8>),
    Failing,
}

#[async_trait]
impl ImageProvider for FakeImageProvider {
    async fn generate(&self, _animal: &str) -> Result<Vec<u8>, ImageError> {
        match self {
            FakeImageProvider::Fixed(bytes) => Ok(bytes.clone()),
            FakeImageProvider::Failing => Err(ImageError::MalformedPayload(
                "fake image provider configured to fail".into(),
            )),
        }
    }
}

pub fn gato() -> SynthesizedResult {
    SynthesizedResult {
        animal: "Gato".into(),
        descripcion: "Independiente, curioso y dueño de su tiempo.".into(),
        lema: "La siesta es sagrada.".into(),
    }
}

pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 1, 2, 3];

pub struct TestApp {
    pub base_url: String,
    pub store: Arc<InMemoryResultStore>,
    pub client: reqwest::Client,
}

/// Boots the real router with fake collaborators on an ephemeral port.
pub async fn spawn_app(
    synthesizer: FakeSynthesizer,
    image_provider: FakeImageProvider,
) -> TestApp {
    let store = InMemoryResultStore::new();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    let state = Arc::new(AppState {
        store: store.clone(),
        synthesizer: Arc::new(synthesizer),
        image_provider: Arc::new(image_provider),
        result_ttl: Duration::from_secs(86_400),
        public_base_url: base_url.clone(),
    });

    let app = create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    TestApp {
        base_url,
        store,
        client: reqwest::Client::new(),
    }
}

/// A full answer set: q1..q8 mapped to the given letters.
pub fn answers(letters: &[&str]) -> serde_json::Value {
    let respuestas: serde_json::Map<String, serde_json::Value> = letters
        .iter()
        .enumerate()
        .map(|(i, letter)| (format!("q{}", i + 1), serde_json::json!(letter)))
        .collect();
    serde_json::json!({ "respuestas": respuestas })
}
