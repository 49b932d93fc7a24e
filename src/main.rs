use tower_http::{services::ServeFile, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use style_quiz::config::{self, ContentSourceKind};
use style_quiz::content::{ContentStore, DatabaseContent, StaticContent};
use style_quiz::media::{HttpStorage, MediaResolver};
use style_quiz::state::AppState;
use style_quiz::{db, handlers, paths};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "style_quiz=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = config::load_settings();

  let content = match settings.content_source {
    ContentSourceKind::Static => ContentStore::Static(StaticContent::new()),
    ContentSourceKind::Database => {
      let pool = db::init_db(&settings.database_path).expect("Failed to initialize database");
      {
        let conn = db::try_lock(&pool).expect("Database lock failed during startup");
        db::seed_content(&conn).expect("Failed to seed content");
      }
      tracing::info!("Using content database at {}", settings.database_path.display());
      ContentStore::Database(DatabaseContent::new(pool))
    }
  };

  let storage = HttpStorage::new(&settings.storage_url, settings.probe_timeout)
    .expect("Failed to build storage HTTP client");
  let resolver = MediaResolver::with_cache(storage, settings.media.clone(), settings.cache_capacity);

  let mut app = handlers::router(AppState::new(content, resolver));
  // Serve the bundled placeholder unless it points elsewhere
  if settings.media.placeholder_url.starts_with('/') {
    app = app.route_service(
      &settings.media.placeholder_url,
      ServeFile::new(paths::placeholder_file()),
    );
  }
  let app = app.layer(TraceLayer::new_for_http());

  let bind_addr = settings.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", settings.port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
