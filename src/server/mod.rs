//! Local server hosting the blog page, with live reload

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Form, Path as RoutePath, State, WebSocketUpgrade,
    },
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::view::{ClickTarget, SubmitOutcome};
use crate::{Blog, LocalBlogApp};

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    app: Arc<LocalBlogApp>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

#[derive(Debug, Deserialize)]
struct CreateForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    markdown: String,
}

#[derive(Debug, Deserialize)]
struct ClickForm {
    target: String,
}

#[derive(Debug, Deserialize)]
struct ViewportForm {
    width: u32,
}

/// Reply to a sidebar event; the page script mirrors a close in place
#[derive(Debug, Serialize)]
struct SidebarChange {
    closed: bool,
}

/// Build the router for an initialized app
fn router(state: Arc<ServerState>, resources_dir: PathBuf, resources_route: &str) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/posts/:id", get(post_handler))
        .route("/back", post(back_handler))
        .route("/create", get(create_form_handler).post(create_handler))
        .route("/sidebar/toggle", post(toggle_handler))
        .route("/sidebar/click", post(click_handler))
        .route("/viewport", post(viewport_handler))
        .route("/__livereload", get(livereload_handler))
        .nest_service(resources_route, ServeDir::new(resources_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(
    blog: &Blog,
    app: LocalBlogApp,
    ip: &str,
    port: u16,
    watch: bool,
    open: bool,
) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let app = Arc::new(app);
    app.initialize().await;

    let state = Arc::new(ServerState {
        app: app.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let resources_route = format!("/{}", blog.config.resources_dir.trim_matches('/'));
    let router = router(state, blog.resources_dir.clone(), &resources_route);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching {}", blog.resources_dir.display());
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let resources_dir = blog.resources_dir.clone();
        let handle = tokio::runtime::Handle::current();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(resources_dir, app, handle, reload_tx) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Re-load the post list whenever the resources change, then tell clients
fn watch_and_reload(
    resources_dir: PathBuf,
    app: Arc<LocalBlogApp>,
    handle: tokio::runtime::Handle,
    reload_tx: broadcast::Sender<()>,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;
    if resources_dir.exists() {
        debouncer
            .watcher()
            .watch(&resources_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", resources_dir);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let path_str = e.path.to_string_lossy();
                    !path_str.contains(".DS_Store") && !path_str.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                for event in &events {
                    tracing::info!("Resource changed: {}", event.path.display());
                }
                handle.block_on(app.initialize());
                let _ = reload_tx.send(());
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

async fn page(state: &ServerState) -> Html<String> {
    let html = state.app.render_page().await;
    if state.live_reload {
        Html(inject_live_reload(&html))
    } else {
        Html(html)
    }
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    state.app.restore_grid().await;
    page(&state).await
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    RoutePath(id): RoutePath<String>,
) -> Html<String> {
    state.app.open_post(&id).await;
    page(&state).await
}

async fn back_handler(State(state): State<Arc<ServerState>>) -> Redirect {
    state.app.close_post().await;
    Redirect::to("/")
}

async fn create_form_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    state.app.open_create_form().await;
    page(&state).await
}

async fn create_handler(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<CreateForm>,
) -> Response {
    let outcome = state.app.submit_post(&form.title, &form.markdown).await;
    tracing::debug!("Create post: {:?}", outcome);
    match outcome {
        // the export error lives in the grid until the next visit to `/`
        SubmitOutcome::ExportFailed { .. } => page(&state).await.into_response(),
        _ => Redirect::to("/").into_response(),
    }
}

async fn toggle_handler(State(state): State<Arc<ServerState>>) -> Redirect {
    state.app.toggle_sidebar().await;
    Redirect::to("/")
}

async fn click_handler(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<ClickForm>,
) -> Json<SidebarChange> {
    let closed = state.app.click(ClickTarget::from_name(&form.target)).await;
    Json(SidebarChange { closed })
}

async fn viewport_handler(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<ViewportForm>,
) -> Json<SidebarChange> {
    let closed = state.app.resize(form.width).await;
    Json(SidebarChange { closed })
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_live_reload() {
        let html = "<html><body><p>Hi</p></body></html>";
        let injected = inject_live_reload(html);
        assert!(injected.contains("__livereload"));
        assert!(injected.ends_with("</body>\n</html>"));

        assert!(inject_live_reload("<p>bare</p>").starts_with("<p>bare</p>"));
    }

    #[test]
    fn test_sidebar_change_json() {
        let json = serde_json::to_string(&SidebarChange { closed: true }).unwrap();
        assert_eq!(json, r#"{"closed":true}"#);
    }
}
