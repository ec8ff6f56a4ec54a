//! Servidor web Axum com WebSocket para desambiguação MFS em tempo real
//!
//! Variáveis de ambiente:
//! - `WSD_CONFIG`: caminho de um `ResourceConfig` em JSON (opcional)
//! - `WSD_ADDR`: endereço de escuta (padrão `0.0.0.0:3000`)
//! - `RUST_LOG`: filtro do tracing (padrão `info`)

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wsd_core::{
    corpus::demo_sentences, MostFrequentSense, PipelineEvent, ResourceConfig, SenseLabel,
    TokenSpan, WsdContext, WsdError, WsdPipeline,
};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Estado compartilhado da aplicação
struct AppState {
    pipeline: WsdPipeline,
}

/// Alvo opcional da desambiguação: sem `index` nem `span`, a sentença inteira.
#[derive(Debug, Default, Deserialize)]
struct Target {
    #[serde(default)]
    index: Option<i64>,
    /// `[start, end)`
    #[serde(default)]
    span: Option<(i64, i64)>,
}

#[derive(Deserialize)]
struct DisambiguateRequest {
    text: String,
    #[serde(flatten)]
    target: Target,
}

/// Sentença já tokenizada, etiquetada e lematizada pelo chamador
#[derive(Deserialize)]
struct AlignedRequest {
    tokens: Vec<String>,
    tags: Vec<String>,
    lemmas: Vec<String>,
    #[serde(flatten)]
    target: Target,
}

/// Mensagem WebSocket recebida do cliente
#[derive(Deserialize)]
struct WsRequest {
    text: String,
}

#[derive(Serialize)]
struct DisambiguateResponse {
    tokens: Vec<String>,
    tags: Vec<String>,
    lemmas: Vec<String>,
    /// Trecho efetivamente rotulado
    span: TokenSpan,
    labels: Vec<String>,
    senses: Vec<SenseLabel>,
    processing_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("WSD_CONFIG") {
        Ok(path) => {
            info!(%path, "loading resource config");
            ResourceConfig::from_json_file(&path)?
        }
        Err(_) => ResourceConfig::default(),
    };
    let context = WsdContext::from_config(&config).map_err(|e| {
        error!(error = %e, "failed to load WSD resources");
        e
    })?;
    let state = Arc::new(AppState {
        pipeline: WsdPipeline::new(context),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/disambiguate", post(disambiguate_handler))
        .route("/disambiguate/aligned", post(aligned_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .layer(cors)
        .with_state(state);

    let addr = std::env::var("WSD_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Servidor WSD iniciado em http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Erros fatais do motor viram 422 com a mensagem do erro
fn error_response(err: WsdError) -> Response {
    let status = if err.is_input_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!(error = %err, %status, "request failed");
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// Resolve o alvo e chama a operação correspondente do motor.
fn run_target(
    engine: &MostFrequentSense,
    tokens: &[String],
    tags: &[String],
    lemmas: &[String],
    target: &Target,
) -> Result<(TokenSpan, Vec<SenseLabel>), WsdError> {
    let len = tokens.len();
    match (target.index, target.span) {
        (Some(index), _) => {
            // Índice negativo: mesmo erro de um span fora dos limites
            let index = match usize::try_from(index) {
                Ok(index) => index,
                Err(_) => TokenSpan::checked(index, index.saturating_add(1), len)?.start,
            };
            let label = engine.disambiguate_word(tokens, tags, lemmas, index)?;
            Ok((TokenSpan::new(index, index + 1), vec![label]))
        }
        (None, Some((start, end))) => {
            let span = TokenSpan::checked(start, end, len)?;
            Ok((span, engine.disambiguate_span(tokens, tags, lemmas, span)?))
        }
        (None, None) => Ok((TokenSpan::full(len), engine.disambiguate_all(tokens, tags, lemmas)?)),
    }
}

fn respond(
    engine: &MostFrequentSense,
    tokens: Vec<String>,
    tags: Vec<String>,
    lemmas: Vec<String>,
    target: &Target,
    start: Instant,
) -> Response {
    if target.index.is_some() && target.span.is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "use either `index` or `span`, not both" })),
        )
            .into_response();
    }
    match run_target(engine, &tokens, &tags, &lemmas, target) {
        Ok((span, senses)) => Json(DisambiguateResponse {
            labels: senses.iter().map(SenseLabel::label).collect(),
            senses,
            span,
            tokens,
            tags,
            lemmas,
            processing_ms: start.elapsed().as_millis() as u64,
        })
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// Desambiguação de texto bruto via HTTP POST (sem streaming)
async fn disambiguate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DisambiguateRequest>,
) -> Response {
    let start = Instant::now();
    let sentence = match state.pipeline.prepare(&req.text) {
        Ok(sentence) => sentence,
        Err(err) => return error_response(err),
    };
    respond(
        state.pipeline.engine(),
        sentence.tokens,
        sentence.tags,
        sentence.lemmas,
        &req.target,
        start,
    )
}

/// Desambiguação de uma sentença já anotada pelo chamador
async fn aligned_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AlignedRequest>,
) -> Response {
    let start = Instant::now();
    respond(
        state.pipeline.engine(),
        req.tokens,
        req.tags,
        req.lemmas,
        &req.target,
        start,
    )
}

/// Retorna as sentenças de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_sentences()
        .iter()
        .map(|(topic, text)| serde_json::json!({ "topic": topic, "text": text }))
        .collect();
    Json(texts)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Recebe texto, executa o pipeline e devolve os eventos na ordem em que foram emitidos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // Aceita {"text": "..."} ou o texto puro
                let text = match serde_json::from_str::<WsRequest>(&text) {
                    Ok(req) => req.text,
                    Err(_) => text,
                };
                let text = text.trim().to_string();
                if text.is_empty() {
                    continue;
                }

                info!(chars = text.len(), "analisando via WebSocket");

                // O pipeline é síncrono: roda fora do runtime
                let (tx, rx) = std::sync::mpsc::channel::<PipelineEvent>();
                let state_for_thread = Arc::clone(&state);
                let handle = tokio::task::spawn_blocking(move || {
                    state_for_thread.pipeline.analyze_streaming(&text, tx);
                });
                if let Err(err) = handle.await {
                    error!(error = %err, "pipeline task failed");
                    return;
                }

                let events: Vec<PipelineEvent> = rx.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return;
                        }
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
