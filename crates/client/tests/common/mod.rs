#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use retailinv_client::ClientConfig;
use serde_json::{Value, json};

pub const JWT_SECRET: &str = "test-secret";

/// HS256 token in the backend's claim layout. `role = None` leaves the claim out.
pub fn mint_jwt(email: &str, role: Option<&str>, exp_offset_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let mut claims = json!({
        "sub": email,
        "iat": now,
        "exp": now + exp_offset_secs,
    });
    if let Some(role) = role {
        claims["role"] = json!(role);
    }

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Account {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    phone_number: String,
    role: String,
}

impl Account {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "firstName": self.first_name,
            "lastName": self.last_name,
            "email": self.email,
            "phoneNumber": self.phone_number,
            "role": self.role,
            "password": format!("$2a$10${}", self.password.len()),
        })
    }
}

#[derive(Default)]
struct Inner {
    accounts: Vec<Account>,
    /// token -> account email
    sessions: HashMap<String, String>,
    revoked: HashSet<String>,
    overrides: HashMap<String, StatusCode>,
    requests: Vec<RecordedRequest>,
}

/// In-process stand-in for the account, store, product and inventory services.
#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, email: &str, password: &str, role: &str) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.accounts.len() as i64 + 1;
            inner.accounts.push(Account {
                id,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: email.to_string(),
                password: password.to_string(),
                phone_number: "555-0100".to_string(),
                role: role.to_string(),
            });
        }
        self
    }

    /// Every request to `path` answers `status` with an `{"error"}` body.
    pub fn respond_with(&self, path: &str, status: StatusCode) {
        self.inner
            .lock()
            .unwrap()
            .overrides
            .insert(path.to_string(), status);
    }

    /// Mint a token the backend accepts, bypassing `/auth/login`.
    pub fn issue(&self, email: &str, role: Option<&str>) -> String {
        let token = mint_jwt(email, role, 600);
        self.inner
            .lock()
            .unwrap()
            .sessions
            .insert(token.clone(), email.to_string());
        token
    }

    pub fn revoke(&self, token: &str) {
        self.inner.lock().unwrap().revoked.insert(token.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub async fn spawn(self) -> TestServer {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            base_url,
            backend: self,
            handle,
        }
    }

    fn session_for(&self, bearer: Option<&str>) -> Option<Account> {
        let inner = self.inner.lock().unwrap();
        let token = bearer?;
        if inner.revoked.contains(token) {
            return None;
        }
        let email = inner.sessions.get(token)?;
        inner.accounts.iter().find(|a| &a.email == email).cloned()
    }
}

pub struct TestServer {
    pub base_url: String,
    pub backend: MockBackend,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::single(self.base_url.clone())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_config() -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ClientConfig::single(format!("http://{}", addr))
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn handle(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    let body: Option<Value> = serde_json::from_slice(&body).ok();

    let forced = {
        let mut inner = backend.inner.lock().unwrap();
        inner.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query: uri.query().map(str::to_string),
            bearer: bearer.clone(),
            body: body.clone(),
        });
        inner.overrides.get(&path).copied()
    };
    if let Some(status) = forced {
        return error(status, "forced failure");
    }

    let body = body.unwrap_or(Value::Null);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        (Method::POST, ["auth", "login"]) => login(&backend, &body),
        (Method::POST, ["auth", "register"]) => register(&backend, &body),
        (Method::POST, ["auth", "token", "validate"]) => {
            let token = body["token"].as_str();
            if backend.session_for(token).is_some() {
                Json(json!({ "valid": true })).into_response()
            } else {
                error(StatusCode::UNAUTHORIZED, "Invalid or expired token")
            }
        }
        (method, segments) => {
            let Some(account) = backend.session_for(bearer.as_deref()) else {
                return error(StatusCode::UNAUTHORIZED, "Unauthorized");
            };
            resource(&backend, &account, method, segments, uri.query(), &body)
        }
    }
}

fn login(backend: &MockBackend, body: &Value) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let account = {
        let inner = backend.inner.lock().unwrap();
        inner
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .cloned()
    };
    let Some(account) = account else {
        return error(StatusCode::UNAUTHORIZED, "Invalid email or password");
    };

    let token = backend.issue(&account.email, Some(&account.role));
    Json(json!({ "message": "Login successful", "token": token })).into_response()
}

fn register(backend: &MockBackend, body: &Value) -> Response {
    let field = |name: &str| body[name].as_str().unwrap_or_default().to_string();

    let password = field("password");
    if password.len() < 6 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "password": "size must be between 6 and 100" })),
        )
            .into_response();
    }

    let mut inner = backend.inner.lock().unwrap();
    let email = field("email");
    if inner.accounts.iter().any(|a| a.email == email) {
        return error(StatusCode::BAD_REQUEST, "Email is already in use");
    }

    let account = Account {
        id: inner.accounts.len() as i64 + 1,
        first_name: field("firstName"),
        last_name: field("lastName"),
        email,
        password,
        phone_number: field("phoneNumber"),
        role: field("role"),
    };
    inner.accounts.push(account.clone());
    (StatusCode::CREATED, Json(account.to_json())).into_response()
}

fn resource(
    backend: &MockBackend,
    account: &Account,
    method: Method,
    segments: &[&str],
    query: Option<&str>,
    body: &Value,
) -> Response {
    let admin_only = matches!(segments, ["admin", ..]) || method != Method::GET;
    if admin_only && account.role != "ADMIN" {
        return error(StatusCode::FORBIDDEN, "Access denied");
    }

    match (method, segments) {
        (Method::GET, ["user", "profile"]) => Json(account.to_json()).into_response(),
        (Method::GET, ["stores"]) => Json(json!([
            { "id": 1, "name": "Main Street", "address": "1 Main St", "createdAt": "2024-03-01T09:30:00" },
            { "id": 2, "name": "Harbour", "address": "22 Quay Rd" },
        ]))
        .into_response(),
        (Method::POST, ["stores"]) => {
            created(with_id(body, 10, &[("createdAt", json!("2024-03-05T08:00:00"))]))
        }
        (Method::PUT, ["stores", id]) => Json(with_id(body, parse_id(id), &[])).into_response(),
        (Method::DELETE, ["stores", _]) => StatusCode::NO_CONTENT.into_response(),

        (Method::GET, ["products"]) => Json(json!([
            { "id": 1, "name": "Rice", "price": 2.5, "category": "Grains", "storeId": 1 },
        ]))
        .into_response(),
        (Method::POST, ["products"]) => created(with_id(body, 20, &[])),
        (Method::PUT, ["products", id]) => Json(with_id(body, parse_id(id), &[])).into_response(),
        (Method::DELETE, ["products", _]) => StatusCode::NO_CONTENT.into_response(),

        (Method::GET, ["admin", "users"]) => {
            let inner = backend.inner.lock().unwrap();
            let users: Vec<Value> = inner.accounts.iter().map(Account::to_json).collect();
            Json(Value::Array(users)).into_response()
        }
        (Method::POST, ["admin", "users"]) => {
            let email = body["email"].as_str().unwrap_or_default();
            let taken = backend
                .inner
                .lock()
                .unwrap()
                .accounts
                .iter()
                .any(|a| a.email == email);
            if taken {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "email": "is already in use" })),
                )
                    .into_response();
            }
            created(with_id(body, 30, &[("password", json!("$2a$10$hashed"))]))
        }
        (Method::PUT, ["admin", "users", id]) => Json(with_id(
            body,
            parse_id(id),
            &[("password", json!("$2a$10$hashed"))],
        ))
        .into_response(),
        (Method::DELETE, ["admin", "users", _]) => {
            Json(json!({ "message": "User deleted" })).into_response()
        }

        (Method::GET, ["inventory", "movements", "metrics"]) => {
            Json(json!({ "ENTRY": 3, "EXIT": 1 })).into_response()
        }
        (Method::GET, ["inventory", "movements"]) => Json(json!([
            movement(1, 1, "ENTRY"),
            movement(2, 2, "EXIT"),
        ]))
        .into_response(),
        (Method::GET, ["inventory", "movements", store_id]) => {
            Json(json!([movement(1, parse_id(store_id), "ENTRY")])).into_response()
        }
        (Method::GET, ["inventory", store_id]) => Json(json!([
            { "id": 5, "storeId": parse_id(store_id), "productId": 1, "quantity": 40 },
            { "id": 6, "storeId": parse_id(store_id), "productId": 2, "quantity": 0 },
        ]))
        .into_response(),
        (Method::PUT, ["inventory", store_id, product_id]) => {
            let quantity = query
                .unwrap_or_default()
                .split('&')
                .find_map(|pair| pair.strip_prefix("quantity="))
                .and_then(|q| q.parse::<i64>().ok())
                .unwrap_or_default();
            Json(json!({
                "id": 9,
                "storeId": parse_id(store_id),
                "productId": parse_id(product_id),
                "quantity": 40 + quantity,
            }))
            .into_response()
        }
        _ => error(StatusCode::NOT_FOUND, "Not found"),
    }
}

fn parse_id(raw: &str) -> i64 {
    raw.parse().unwrap_or_default()
}

fn created(body: Value) -> Response {
    (StatusCode::CREATED, Json(body)).into_response()
}

/// Echo a submitted record back the way the services do: with an id and any
/// server-side fields filled in.
fn with_id(body: &Value, id: i64, extra: &[(&str, Value)]) -> Value {
    let mut record = body.clone();
    if let Value::Object(map) = &mut record {
        map.insert("id".to_string(), json!(id));
        for (key, value) in extra {
            map.insert((*key).to_string(), value.clone());
        }
    }
    record
}

fn movement(id: i64, store_id: i64, movement_type: &str) -> Value {
    json!({
        "id": id,
        "storeId": store_id,
        "productId": 1,
        "userId": 1,
        "quantity": 5,
        "movementType": movement_type,
        "movementDate": "2024-03-02T11:00:00",
    })
}
