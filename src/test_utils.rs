#[cfg(test)]
pub mod test_utils {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::{
        Json, Router,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::post,
    };
    use serde_json::{Value, json};
    use tokio::net::TcpListener;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::client::PredictionClient;
    use crate::config::ClientSettings;
    use crate::session::PredictionSession;

    /// Request bodies received by the stub, in arrival order.
    #[derive(Clone, Default)]
    pub struct Received(Arc<Mutex<Vec<Value>>>);

    impl Received {
        pub fn bodies(&self) -> Vec<Value> {
            self.0.lock().unwrap().clone()
        }
    }

    /// A prediction service running on an ephemeral local port.
    ///
    /// Test logging stays installed on the current thread while this lives.
    pub struct StubService {
        pub base_url: String,
        pub received: Received,
        _tracing: tracing::subscriber::DefaultGuard,
    }

    impl StubService {
        pub fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        /// Session pointed at `path` on this stub.
        pub fn session(&self, path: &str, timeout_ms: u64) -> PredictionSession {
            session_for(self.url(path), timeout_ms)
        }
    }

    pub fn session_for(endpoint: String, timeout_ms: u64) -> PredictionSession {
        let settings = ClientSettings {
            endpoint,
            timeout_ms,
        };
        PredictionSession::new(PredictionClient::from_settings(&settings).unwrap())
    }

    pub fn scenario_response() -> Value {
        json!({
            "predicted_quantity": 120.5,
            "safety_stock": 30.2,
            "reorder_point": 45.7,
            "inventory_suggestion": "Reorder soon"
        })
    }

    async fn predict(State(received): State<Received>, Json(body): Json<Value>) -> Json<Value> {
        received.0.lock().unwrap().push(body);
        Json(scenario_response())
    }

    /// Answers with figures derived from the request so tests can tell
    /// submissions apart: predicted = budget, reorder = market_share.
    /// A null budget is rejected with 422.
    async fn echo(State(received): State<Received>, Json(body): Json<Value>) -> Response {
        let Some(budget) = body["budget"].as_f64() else {
            received.0.lock().unwrap().push(body);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": "budget must be a number"})),
            )
                .into_response();
        };
        let response = json!({
            "predicted_quantity": budget,
            "safety_stock": 1.0,
            "reorder_point": body["market_share"].as_f64().unwrap_or(0.0),
            "inventory_suggestion": body["region"].as_str().unwrap_or("")
        });
        received.0.lock().unwrap().push(body);
        Json(response).into_response()
    }

    async fn invalid(State(received): State<Received>, Json(body): Json<Value>) -> impl IntoResponse {
        received.0.lock().unwrap().push(body);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": [{"loc": ["body", "budget"], "msg": "Input should be a valid number"}]
            })),
        )
    }

    async fn broken() -> impl IntoResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }

    async fn shape() -> Json<Value> {
        Json(json!({"status": "ok"}))
    }

    async fn slow() -> Json<Value> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Json(scenario_response())
    }

    pub fn stub_router(received: Received) -> Router {
        Router::new()
            .route("/predict", post(predict))
            .route("/echo", post(echo))
            .route("/invalid", post(invalid))
            .route("/broken", post(broken))
            .route("/shape", post(shape))
            .route("/slow", post(slow))
            .with_state(received)
    }

    /// Starts the stub service in the background.
    pub async fn start_stub_service() -> StubService {
        let tracing_guard = init_test_tracing();

        let received = Received::default();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("Stub listener has no address");
        let router = stub_router(received.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        StubService {
            base_url: format!("http://{}", addr),
            received,
            _tracing: tracing_guard,
        }
    }

    /// URL of a local port with nothing listening on it.
    pub async fn closed_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind probe listener");
        let addr = listener.local_addr().expect("Probe listener has no address");
        drop(listener);
        format!("http://{}/predict", addr)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The level comes from RUST_LOG and defaults to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}
