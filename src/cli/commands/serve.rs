//! HTTP API server for the web front-end.
//!
//! Exposes video processing and chat endpoints. Failures never surface as
//! bare 500 pages: chat errors carry a safe user-facing `content` so the
//! front-end can always render something.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::context::BudgetProfile;
use crate::generation::OpenAIGenerator;
use crate::pipeline::{ChatPipeline, ChatRequest};
use crate::processor::VideoProcessor;
use crate::store::StoredVideo;
use crate::video::{ConversationTurn, VideoContext};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Safe reply when the generation call fails outright.
const GENERATION_FAILED_REPLY: &str =
    "I'm sorry, I encountered an error while processing your message. Please try again.";

/// Safe reply when the request is missing required data.
const MISSING_DATA_REPLY: &str =
    "I'm sorry, I need more information to help you with this video.";

/// Shared application state.
struct AppState {
    pipeline: ChatPipeline,
    processor: VideoProcessor,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Serve, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let generator = Arc::new(OpenAIGenerator::new(&settings.generation));
    let pipeline = ChatPipeline::new(&settings, generator)?;
    let processor = VideoProcessor::new(&settings)?;

    let state = Arc::new(AppState {
        pipeline,
        processor,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/process", post(process))
        .route("/video/{video_id}", get(get_video))
        .route("/videos", get(list_videos))
        .route("/chat", post(chat))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Spole API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Process", "POST /process");
    Output::kv("Get Video", "GET  /video/:video_id");
    Output::kv("List Videos", "GET  /videos");
    Output::kv("Chat", "POST /chat");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ProcessRequest {
    /// YouTube URL or video ID
    url: String,
    /// Re-process even if already stored
    #[serde(default)]
    force: bool,
}

#[derive(Serialize)]
struct ProcessResponse {
    video_id: String,
    title: String,
    section_count: usize,
    transcript_available: bool,
    skipped: bool,
}

#[derive(Serialize)]
struct VideoResponse {
    video_id: String,
    title: String,
    description: String,
    duration_seconds: u32,
    sections: Vec<crate::video::Section>,
    transcript: String,
}

#[derive(Deserialize)]
struct ChatRequestBody {
    message: String,
    #[serde(default)]
    video_id: Option<String>,
    /// Inline context; wins over a stored video when both are present.
    #[serde(default)]
    video_context: Option<VideoContext>,
    #[serde(default)]
    current_time_seconds: u32,
    #[serde(default)]
    history: Vec<ConversationTurn>,
    #[serde(default)]
    profile: BudgetProfile,
}

#[derive(Serialize)]
struct ChatResponseBody {
    content: String,
    citations: Vec<crate::citation::Citation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn process(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessRequest>,
) -> impl IntoResponse {
    match state.processor.process(&req.url, req.force).await {
        Ok(result) => Json(ProcessResponse {
            video_id: result.video_id,
            title: result.title,
            section_count: result.section_count,
            transcript_available: result.transcript_available,
            skipped: result.skipped,
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn get_video(
    State(state): State<Arc<AppState>>,
    axum::extract::Path(video_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    match state.processor.store().get(&video_id).await {
        Ok(Some(video)) => Json(video_response(video)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Video not found: {}", video_id),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn list_videos(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.processor.store().list().await {
        Ok(videos) => Json(videos).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequestBody>,
) -> impl IntoResponse {
    if req.message.trim().is_empty() {
        return chat_error(
            StatusCode::BAD_REQUEST,
            "Missing message",
            MISSING_DATA_REPLY,
        );
    }

    // Resolve the video context: inline payload wins, stored video second.
    let video = match (&req.video_context, &req.video_id) {
        (Some(context), _) => context.clone(),
        (None, Some(video_id)) => match state.processor.store().get(video_id).await {
            Ok(Some(stored)) => stored.to_context(),
            Ok(None) => {
                return chat_error(
                    StatusCode::NOT_FOUND,
                    &format!("Video not processed: {}", video_id),
                    MISSING_DATA_REPLY,
                );
            }
            Err(e) => {
                error!("Store lookup failed: {}", e);
                return chat_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Store lookup failed",
                    GENERATION_FAILED_REPLY,
                );
            }
        },
        (None, None) => {
            return chat_error(
                StatusCode::BAD_REQUEST,
                "Missing video_id or video_context",
                MISSING_DATA_REPLY,
            );
        }
    };

    let request = ChatRequest {
        message: req.message,
        video,
        current_time_seconds: req.current_time_seconds,
        history: req.history,
        profile: req.profile,
    };

    match state.pipeline.respond(&request).await {
        Ok(reply) => Json(ChatResponseBody {
            content: reply.content,
            citations: reply.citations,
            error: None,
        })
        .into_response(),
        Err(e) => {
            error!("Chat pipeline failed: {}", e);
            chat_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process chat message",
                GENERATION_FAILED_REPLY,
            )
        }
    }
}

/// A chat failure still carries renderable `content` for the front-end.
fn chat_error(status: StatusCode, error: &str, content: &str) -> axum::response::Response {
    (
        status,
        Json(ChatResponseBody {
            content: content.to_string(),
            citations: Vec::new(),
            error: Some(error.to_string()),
        }),
    )
        .into_response()
}

fn video_response(video: StoredVideo) -> VideoResponse {
    VideoResponse {
        video_id: video.video_id,
        title: video.title,
        description: video.description,
        duration_seconds: video.duration_seconds,
        sections: video.sections,
        transcript: video.transcript,
    }
}
