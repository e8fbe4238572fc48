use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{
    configuration::Settings,
    document::{Document, DocumentPatch},
    error::ApiError,
    store::DocumentStore,
};

pub struct Application {
    listener: TcpListener,
    router: Router,
    port: u16,
}

#[derive(Clone)]
pub struct ApplicationState {
    store: DocumentStore,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, std::io::Error> {
        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );

        let listener = TcpListener::bind(address).await?;
        let port = listener.local_addr()?.port();

        let store = DocumentStore::new(&settings.storage.documents_dir);
        store.ensure_dir().await?;

        let application_state = ApplicationState { store };

        let router = Router::new()
            .route("/new", post(new_document))
            .route("/read", get(read_document))
            .route("/update", post(update_document))
            .route("/delete", post(delete_document))
            .fallback_service(ServeDir::new(settings.application.static_dir))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::default().include_headers(true)),
            )
            .with_state(application_state);

        Ok(Self {
            listener,
            router,
            port,
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", self.listener.local_addr()?);
        axum::serve(self.listener, self.router).await
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[derive(Deserialize)]
struct TitleQuery {
    title: Option<String>,
}

impl TitleQuery {
    // an empty value counts as absent, matching clients that send ?title=
    fn require(self) -> Result<String, ApiError> {
        self.title
            .filter(|title| !title.is_empty())
            .ok_or(ApiError::MissingTitleParam)
    }
}

fn parse_patch(body: &Bytes) -> Result<DocumentPatch, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::MalformedBody)
}

async fn load_document(
    store: &DocumentStore,
    title: &str,
) -> Result<(Vec<u8>, Document), ApiError> {
    let raw = store.read(title).await?;
    let document = serde_json::from_slice(&raw).map_err(ApiError::MalformedDocument)?;
    Ok((raw, document))
}

async fn new_document(State(state): State<ApplicationState>, body: Bytes) -> Result<(), ApiError> {
    let existing = state.store.titles().await?;
    let patch = parse_patch(&body)?;
    let document = patch.into_document(&existing)?;
    state.store.write(&document).await?;
    Ok(())
}

async fn read_document(
    State(state): State<ApplicationState>,
    Query(query): Query<TitleQuery>,
) -> Result<Response, ApiError> {
    let title = query.require()?;
    let (raw, _) = load_document(&state.store, &title).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], raw).into_response())
}

async fn update_document(
    State(state): State<ApplicationState>,
    Query(query): Query<TitleQuery>,
    body: Bytes,
) -> Result<(), ApiError> {
    let title = query.require()?;
    let (_, old) = load_document(&state.store, &title).await?;
    let patch = parse_patch(&body)?;
    let updated = old.merge(patch);

    // Remove-then-write is not atomic: a failed write here loses the old
    // document, and the 500 is the only signal the caller gets.
    state.store.remove(&title).await?;
    state.store.write(&updated).await?;
    Ok(())
}

async fn delete_document(
    State(state): State<ApplicationState>,
    Query(query): Query<TitleQuery>,
) -> Result<(), ApiError> {
    let title = query.require()?;
    // the read turns deleting an absent title into not-found instead of a
    // storage error
    state.store.read(&title).await?;
    state.store.remove(&title).await?;
    Ok(())
}
