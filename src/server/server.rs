mod error;
mod server_config;
use error::ServerError;
use server_config::AppConfig;

use std::{path::Path, sync::{Arc, Mutex, MutexGuard}};

use anyhow::{anyhow, Context};
use axum::{
    extract::{Path as UrlPath, State},
    http::StatusCode,
    routing::get,
    Json, Router
};
use log::info;
use serde::Deserialize;
use tower_http::services::ServeDir;

use tally::{LedgerStore, Summary, Transaction, Amount, TransactionId,
    backend::{JsonStore, Storage}};

const SERVER_CONFIG: &str = "resources/server.toml";

type SharedLedger<S> = Arc<Mutex<LedgerStore<S>>>;

/// Amounts arrive either as the raw text of the input field or as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Number(Amount),
    Text(String)
}

#[derive(Deserialize)]
struct NewTransaction {
    description: String,
    amount: AmountInput
}

fn lock<S: Storage>(ledger: &SharedLedger<S>) -> Result<MutexGuard<'_, LedgerStore<S>>, ServerError> {
    ledger.lock().map_err(|_| anyhow!("ledger lock poisoned").into())
}

async fn list_transactions<S: Storage + Send + 'static>(
    State(ledger): State<SharedLedger<S>>
) -> Result<Json<Vec<Transaction>>, ServerError> {
    let ledger = lock(&ledger)?;
    return Ok(Json(ledger.newest_first().cloned().collect()));
}

async fn get_transaction<S: Storage + Send + 'static>(
    State(ledger): State<SharedLedger<S>>,
    UrlPath(id): UrlPath<TransactionId>
) -> Result<Json<Transaction>, ServerError> {
    let ledger = lock(&ledger)?;
    match ledger.get(id) {
        Some(transaction) => Ok(Json(transaction.clone())),
        None => Err(ServerError::NotFound(format!("transaction {}", id)))
    }
}

async fn add_transaction<S: Storage + Send + 'static>(
    State(ledger): State<SharedLedger<S>>,
    Json(input): Json<NewTransaction>
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    let mut ledger = lock(&ledger)?;
    let transaction = match input.amount {
        AmountInput::Number(amount) => ledger.add(&input.description, amount)?,
        AmountInput::Text(text) => ledger.submit(&input.description, &text)?
    };
    info!("added transaction {}", transaction.id);
    return Ok((StatusCode::CREATED, Json(transaction)));
}

async fn remove_transaction<S: Storage + Send + 'static>(
    State(ledger): State<SharedLedger<S>>,
    UrlPath(id): UrlPath<TransactionId>
) -> Result<StatusCode, ServerError> {
    let mut ledger = lock(&ledger)?;
    if ledger.remove(id)?.is_some() {
        info!("removed transaction {}", id);
    }
    return Ok(StatusCode::NO_CONTENT);
}

async fn summary<S: Storage + Send + 'static>(
    State(ledger): State<SharedLedger<S>>
) -> Result<Json<Summary>, ServerError> {
    let ledger = lock(&ledger)?;
    return Ok(Json(ledger.summarize()));
}

fn app<S: Storage + Send + 'static>(ledger: LedgerStore<S>, static_dir: Option<&Path>) -> Router {
    let state: SharedLedger<S> = Arc::new(Mutex::new(ledger));

    let api = Router::new()
        .route("/api/transactions",
            get(list_transactions::<S>).post(add_transaction::<S>))
        .route("/api/transactions/:id",
            get(get_transaction::<S>).delete(remove_transaction::<S>))
        .route("/api/summary", get(summary::<S>))
        .with_state(state);

    match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = std::env::args().nth(1)
        .unwrap_or_else(|| SERVER_CONFIG.to_owned());
    let config = AppConfig::read(&config_path)?;

    let store = JsonStore::new(&config.storage.directory);
    let ledger = LedgerStore::open_slot(store, &config.storage.slot)
        .with_ids(config.storage.ids.generator());
    info!("loaded {} transactions from {}/{}.json",
        ledger.len(), ledger.storage().directory().display(), ledger.slot());

    let listener = tokio::net::TcpListener::bind(config.server.address)
        .await
        .with_context(|| format!("failed to bind {}", config.server.address))?;
    info!("listening on {}", config.server.address);

    axum::serve(listener, app(ledger, config.server.static_dir.as_deref()))
        .await
        .with_context(|| "server stopped unexpectedly")?;
    return Ok(());
}


#[cfg(test)]
mod tests {
    use super::app;

    use axum::{body::{to_bytes, Body}, http::{Request, StatusCode}, Router};
    use rstest::{fixture, rstest};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use tally::{LedgerStore, backend::{MemoryStore, Storage}};

    #[fixture]
    fn store() -> MemoryStore {
        MemoryStore::new()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty())
        }.unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        return (status, value);
    }

    #[rstest]
    #[tokio::test]
    async fn add_list_and_summarize(store: MemoryStore) {
        let app = app(LedgerStore::open(store.clone()), None);

        let (status, salary) = send(&app, "POST", "/api/transactions",
            Some(json!({"description": "Salary", "amount": "1000.00"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(salary, json!({"id": 1, "description": "Salary", "amount": 1000.0}));

        let (status, _) = send(&app, "POST", "/api/transactions",
            Some(json!({"description": "Rent", "amount": -500}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, listed) = send(&app, "GET", "/api/transactions", None).await;
        let descriptions: Vec<&str> = listed.as_array().unwrap().iter()
            .map(|t| t["description"].as_str().unwrap()).collect();
        assert_eq!(descriptions, vec!["Rent", "Salary"]);

        let (_, summary) = send(&app, "GET", "/api/summary", None).await;
        assert_eq!(summary, json!({"totalIncome": 1000.0, "totalExpense": -500.0, "balance": 500.0}));

        assert!(store.get("transactions").unwrap().unwrap().contains("Rent"));
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_invalid_input(store: MemoryStore) {
        let app = app(LedgerStore::open(store.clone()), None);

        let (status, _) = send(&app, "POST", "/api/transactions",
            Some(json!({"description": "", "amount": "50"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "POST", "/api/transactions",
            Some(json!({"description": "Lunch", "amount": "fifty"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(store.get("transactions").unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_is_idempotent(store: MemoryStore) {
        let app = app(LedgerStore::open(store), None);
        send(&app, "POST", "/api/transactions",
            Some(json!({"description": "Salary", "amount": 1000}))).await;
        send(&app, "POST", "/api/transactions",
            Some(json!({"description": "Rent", "amount": -500}))).await;

        let (status, _) = send(&app, "DELETE", "/api/transactions/2", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", "/api/transactions/2", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", "/api/transactions/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, summary) = send(&app, "GET", "/api/summary", None).await;
        assert_eq!(summary["balance"], json!(1000.0));
    }

    #[rstest]
    #[tokio::test]
    async fn storage_failure_is_reported() {
        let app = app(LedgerStore::open(MemoryStore::with_quota(8)), None);

        let (status, _) = send(&app, "POST", "/api/transactions",
            Some(json!({"description": "Salary", "amount": 1000}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (_, listed) = send(&app, "GET", "/api/transactions", None).await;
        assert_eq!(listed, json!([]));
    }

    #[rstest]
    #[tokio::test]
    async fn serves_static_files_outside_api(store: MemoryStore) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>tally</h1>").unwrap();
        let app = app(LedgerStore::open(store), Some(dir.path()));

        for uri in ["/", "/index.html"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&bytes[..], b"<h1>tally</h1>");
        }

        let (status, _) = send(&app, "GET", "/missing.css", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, summary) = send(&app, "GET", "/api/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["balance"], json!(0.0));
    }
}
