use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use tokio::sync::RwLock;

use stacklist::model::Board;
use stacklist::remote::USER_ID_HEADER;

#[path = "stacklist_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "stacklist_server/persistence.rs"]
mod persistence;
use self::persistence::*;
#[path = "stacklist_server/handlers_auth.rs"]
mod handlers_auth;
use self::handlers_auth::*;
#[path = "stacklist_server/handlers_lists.rs"]
mod handlers_lists;
use self::handlers_lists::*;
#[path = "stacklist_server/handlers_items.rs"]
mod handlers_items;
use self::handlers_items::*;

/// The authenticated user, resolved from the `X-User-Id` header.
#[derive(Clone, Debug)]
struct Subject {
    user_id: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct UserRecord {
    id: String,
    email: String,

    // blake3 hash of the password; the plaintext is never stored.
    password_hash: String,

    created_at: String,
}

#[derive(Clone)]
struct AppState {
    data_dir: PathBuf,

    // Keyed by user id.
    users: Arc<RwLock<HashMap<String, UserRecord>>>,

    // email -> user id, rebuilt from users at startup.
    email_index: Arc<RwLock<HashMap<String, String>>>,

    // user id -> that user's lists.
    boards: Arc<RwLock<HashMap<String, Board>>>,
}

#[derive(Parser)]
#[command(name = "stacklist-server")]
#[command(about = "Hierarchical to-do list server (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:7878")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Data directory
    #[arg(long, default_value = "./stacklist-data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    let users = load_users_from_disk(&args.data_dir).context("load users")?;
    let boards = load_boards_from_disk(&args.data_dir).context("load boards")?;

    let email_index: HashMap<String, String> = users
        .values()
        .map(|u| (u.email.clone(), u.id.clone()))
        .collect();

    let state = Arc::new(AppState {
        data_dir: args.data_dir,
        users: Arc::new(RwLock::new(users)),
        email_index: Arc::new(RwLock::new(email_index)),
        boards: Arc::new(RwLock::new(boards)),
    });

    let authed = Router::new()
        .route("/lists", get(get_lists).post(create_list))
        .route("/lists/:list_id", axum::routing::put(rename_list).delete(delete_list))
        .route("/items", post(create_item))
        .route("/items/move", post(move_item))
        .route(
            "/items/:item_id",
            axum::routing::put(update_item).delete(delete_item),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_user));

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(authed)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("stacklist-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn require_user(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(USER_ID_HEADER) else {
        return unauthorized();
    };

    let Ok(user_id) = value.to_str() else {
        return unauthorized();
    };
    let user_id = user_id.to_string();

    let known = {
        let users = state.users.read().await;
        users.contains_key(&user_id)
    };
    if !known {
        return unauthorized();
    }

    let mut req = req;
    req.extensions_mut().insert(Subject { user_id });
    next.run(req).await
}

fn hash_password(secret: &str) -> String {
    blake3::hash(secret.as_bytes()).to_hex().to_string()
}

fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}
