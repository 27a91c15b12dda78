use axum::Router;
use axum::extract::{DefaultBodyLimit, Extension};
use axum::routing::{get, post};
use intake_server::config::Config;
use intake_server::contacts::handlers::handle_submit_contact;
use intake_server::logging::errlog::ErrorLog;
use intake_server::notify::mailer::Mailer;
use intake_server::state::AppState;
use intake_server::storage::attachments::AttachmentStore;
use intake_server::storage::records::RecordStore;
use intake_server::stories::handlers::{handle_list_stories, handle_submit_story};

use anyhow::Context;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Uploaded photos can be several megabytes; the axum default body limit
/// (2 MiB) is too tight for phone camera output.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::from_env()?;

    // 1. Bootstrap the on-disk layout:
    let stories_dir = config.data_dir.join("stories");
    let contacts_dir = config.data_dir.join("contacts");
    let uploads_dir = config.data_dir.join("uploads");
    let logs_dir = config.data_dir.join("logs");
    for dir in [&stories_dir, &contacts_dir, &uploads_dir, &logs_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let errlog = ErrorLog::new(logs_dir.join("error.log"), config.error_log_max_bytes);

    // 2. Outbound mail, if configured:
    let mailer = match config.smtp.as_ref() {
        Some(smtp) => {
            let mailer = Mailer::new(smtp).context("failed to set up SMTP transport")?;
            tracing::info!("Confirmation emails enabled via {}", smtp.host);
            Some(Arc::new(mailer))
        }
        None => {
            tracing::warn!("SMTP not configured; confirmation emails are disabled");
            None
        }
    };

    let state = Arc::new(AppState {
        stories: RecordStore::new(stories_dir, "", errlog.clone()),
        contacts: RecordStore::new(contacts_dir, "contact-", errlog.clone()),
        attachments: AttachmentStore::new(uploads_dir.clone(), errlog),
        mailer,
    });

    // 3. HTTP Router:
    let app = Router::new()
        .route("/submit-story", post(handle_submit_story))
        .route("/stories", get(handle_list_stories))
        .route("/submit-contact", post(handle_submit_contact))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(Extension(state))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive());

    // 4. Start HTTP server:
    tracing::info!("Server running at http://{}", config.bind);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
