// tests/common/mod.rs
//
// Backend falso em memória, servido por axum numa porta efêmera.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Duration,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use saep_frontend::{
    config::{AppConfig, AppState},
    session::{HistoryNavigator, MemorySessionStore},
};

pub const TOKEN: &str = "token-ana";
pub const LOGIN_EMAIL: &str = "ana@saep.com";
pub const LOGIN_PASSWORD: &str = "segredo";

const COLLECTIONS: [&str; 4] = ["categorias", "clientes", "estoques", "produtos"];

pub struct Backend {
    pub collections: HashMap<String, Vec<Value>>,
    pub movements: Vec<Value>,
    pub logs: Vec<Value>,
    pub next_id: i64,
    /// Listagens respondem `{ "count", "results" }` em vez de array puro.
    pub paged: bool,
    pub list_failure: Option<(StatusCode, Option<String>)>,
    /// Listagens respondem 200 com corpo que não é JSON.
    pub broken_list_body: bool,
    pub create_failures: HashMap<String, (StatusCode, Option<String>)>,
    /// Atraso aplicado só na próxima listagem (o conteúdo é lido antes de esperar).
    pub slow_next_list: Option<Duration>,
}

impl Default for Backend {
    fn default() -> Self {
        let collections = COLLECTIONS
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        let logs = vec![
            log_json(1, true),
            log_json(2, false),
            log_json(3, true),
        ];
        Self {
            collections,
            movements: Vec::new(),
            logs,
            next_id: 1,
            paged: false,
            list_failure: None,
            broken_list_body: false,
            create_failures: HashMap::new(),
            slow_next_list: None,
        }
    }
}

fn log_json(id: i64, active: bool) -> Value {
    json!({
        "id": id,
        "createdAt": format!("2024-05-0{id}T10:00:00Z"),
        "updateAt": format!("2024-05-0{id}T10:00:00Z"),
        "is_activate": active,
    })
}

impl Backend {
    fn stock_of(&self, product_id: i64) -> i64 {
        self.movements
            .iter()
            .filter(|m| m["id_produto"].as_i64() == Some(product_id))
            .map(|m| {
                let qty = m["quantidade"].as_i64().unwrap_or(0);
                if m["tipo"] == "S" { -qty } else { qty }
            })
            .sum()
    }

    // Como o servidor devolve: produtos ganham `estoque_atual` calculado
    fn present(&self, resource: &str, item: &Value) -> Value {
        let mut item = item.clone();
        if resource == "produtos" {
            let id = item["id"].as_i64().unwrap_or(0);
            item["estoque_atual"] = json!(self.stock_of(id));
        }
        item
    }

    pub fn list(&self, resource: &str) -> Vec<Value> {
        self.collections
            .get(resource)
            .map(|items| items.iter().map(|i| self.present(resource, i)).collect())
            .unwrap_or_default()
    }

    pub fn insert(&mut self, resource: &str, mut item: Value) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        item["id"] = json!(id);
        if resource == "produtos" {
            if item.get("estoque_minimo").is_none() {
                item["estoque_minimo"] = json!(0);
            }
            if let Some(obj) = item.as_object_mut() {
                obj.remove("estoque_atual");
            }
        }
        self.collections
            .entry(resource.to_string())
            .or_default()
            .push(item);
        id
    }

    fn find(&self, resource: &str, id: i64) -> Option<Value> {
        self.collections
            .get(resource)?
            .iter()
            .find(|i| i["id"].as_i64() == Some(id))
            .cloned()
    }

    fn envelope(&self, items: Vec<Value>) -> Value {
        if self.paged {
            json!({ "count": items.len(), "next": null, "previous": null, "results": items })
        } else {
            Value::Array(items)
        }
    }
}

struct Inner {
    backend: Mutex<Backend>,
    requests: AtomicUsize,
}

impl Inner {
    fn backend(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(|e| e.into_inner())
    }
}

type Shared = Arc<Inner>;

fn detail(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "detail": text }))).into_response()
}

fn failure((status, text): (StatusCode, Option<String>)) -> Response {
    match text {
        Some(text) => detail(status, &text),
        None => (status, Json(json!({}))).into_response(),
    }
}

fn unauthorized(headers: &HeaderMap) -> Option<Response> {
    let has_bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer ") && v.len() > "Bearer ".len());
    if has_bearer {
        None
    } else {
        Some(detail(
            StatusCode::UNAUTHORIZED,
            "As credenciais de autenticação não foram fornecidas.",
        ))
    }
}

async fn count_requests(State(shared): State<Shared>, req: Request, next: Next) -> Response {
    shared.requests.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

async fn list_items(
    State(shared): State<Shared>,
    Path(resource): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let (delay, body) = {
        let mut backend = shared.backend();
        if !backend.collections.contains_key(&resource) {
            return detail(StatusCode::NOT_FOUND, "Não encontrado.");
        }
        if let Some(fail) = backend.list_failure.clone() {
            return failure(fail);
        }
        if backend.broken_list_body {
            return (StatusCode::OK, "<html>manutenção</html>").into_response();
        }

        let mut items = backend.list(&resource);
        if let Some(term) = query.get("search").map(|t| t.to_lowercase()) {
            items.retain(|item| {
                ["nome", "descricao", "sku"].iter().any(|field| {
                    item[*field]
                        .as_str()
                        .is_some_and(|v| v.to_lowercase().contains(&term))
                })
            });
        }
        (backend.slow_next_list.take(), backend.envelope(items))
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    Json(body).into_response()
}

async fn create_item(
    State(shared): State<Shared>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    let mut backend = shared.backend();
    if let Some(fail) = backend.create_failures.get(&resource).cloned() {
        return failure(fail);
    }
    if resource == "produtos" {
        let sku = body["sku"].clone();
        let duplicated = backend
            .collections
            .get("produtos")
            .is_some_and(|items| items.iter().any(|p| p["sku"] == sku));
        if duplicated {
            return detail(StatusCode::BAD_REQUEST, "Já existe produto com este SKU.");
        }
    }

    let id = backend.insert(&resource, body);
    let created = backend
        .find(&resource, id)
        .map(|item| backend.present(&resource, &item))
        .unwrap_or(Value::Null);
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_item(
    State(shared): State<Shared>,
    Path((resource, id)): Path<(String, i64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    let mut backend = shared.backend();
    let Some(items) = backend.collections.get_mut(&resource) else {
        return detail(StatusCode::NOT_FOUND, "Não encontrado.");
    };
    let Some(item) = items.iter_mut().find(|i| i["id"].as_i64() == Some(id)) else {
        return detail(StatusCode::NOT_FOUND, "Não encontrado.");
    };
    if let (Some(target), Some(changes)) = (item.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            if key != "id" && key != "estoque_atual" {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    let updated = item.clone();
    Json(backend.present(&resource, &updated)).into_response()
}

async fn delete_item(
    State(shared): State<Shared>,
    Path((resource, id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    if resource == "clientes" {
        return detail(
            StatusCode::METHOD_NOT_ALLOWED,
            "Operação de delete não permitida.",
        );
    }
    let mut backend = shared.backend();
    let Some(items) = backend.collections.get_mut(&resource) else {
        return detail(StatusCode::NOT_FOUND, "Não encontrado.");
    };
    let before = items.len();
    items.retain(|i| i["id"].as_i64() != Some(id));
    if items.len() == before {
        return detail(StatusCode::NOT_FOUND, "Não encontrado.");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn record_movement(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    let mut backend = shared.backend();
    let product_id = body["id_produto"].as_i64().unwrap_or(0);
    let Some(product) = backend.find("produtos", product_id) else {
        return detail(StatusCode::BAD_REQUEST, "Produto não encontrado.");
    };
    let quantity = body["quantidade"].as_i64().unwrap_or(0);
    let current = backend.stock_of(product_id);
    if body["tipo"] == "S" && quantity > current {
        return detail(StatusCode::BAD_REQUEST, "Estoque insuficiente.");
    }

    let mut movement = body.clone();
    movement["id"] = json!(backend.movements.len() as i64 + 1);
    backend.movements.push(movement.clone());

    let stock = backend.stock_of(product_id);
    let minimum = product["estoque_minimo"].as_i64().unwrap_or(0);
    movement["produto"] = backend.present("produtos", &product);
    movement["estoque_atual"] = json!(stock);
    movement["estoque_minimo"] = json!(minimum);
    movement["estoque_abaixo_minimo"] = json!(stock < minimum);
    (StatusCode::CREATED, Json(movement)).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == LOGIN_EMAIL && body["password"] == LOGIN_PASSWORD {
        Json(json!({
            "access": TOKEN,
            "refresh": "refresh-ana",
            "user": { "id": 1, "email": LOGIN_EMAIL, "nome": "Ana" },
        }))
        .into_response()
    } else {
        detail(
            StatusCode::UNAUTHORIZED,
            "Nenhuma conta ativa encontrada com as credenciais fornecidas",
        )
    }
}

async fn list_logs(State(shared): State<Shared>) -> Response {
    let (delay, body) = {
        let mut backend = shared.backend();
        if let Some(fail) = backend.list_failure.clone() {
            return failure(fail);
        }
        let body = backend.envelope(backend.logs.clone());
        (backend.slow_next_list.take(), body)
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    Json(body).into_response()
}

async fn toggle_log(
    State(shared): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    let mut backend = shared.backend();
    let Some(log) = backend.logs.iter_mut().find(|l| l["id"].as_i64() == Some(id)) else {
        return detail(StatusCode::NOT_FOUND, "Não encontrado.");
    };
    log["is_activate"] = body["is_activate"].clone();
    log["updateAt"] = json!("2024-06-01T09:00:00Z");
    Json(log.clone()).into_response()
}

pub struct TestServer {
    pub base_url: String,
    inner: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let inner = Arc::new(Inner {
            backend: Mutex::new(Backend::default()),
            requests: AtomicUsize::new(0),
        });

        let api = Router::new()
            .route("/login/", post(login))
            .route("/movimentacoes/", post(record_movement))
            .route("/logs/", get(list_logs))
            .route("/logs/{id}/ativar-desativar/", put(toggle_log))
            .route("/{resource}/", get(list_items).post(create_item))
            .route("/{resource}/{id}/", patch(update_item).delete(delete_item));

        let app = Router::new()
            .nest("/api/v1", api)
            .layer(middleware::from_fn_with_state(inner.clone(), count_requests))
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api/v1"),
            inner,
            handle,
        }
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.load(Ordering::SeqCst)
    }

    pub fn with_backend<T>(&self, f: impl FnOnce(&mut Backend) -> T) -> T {
        f(&mut self.inner.backend())
    }

    pub fn seed(&self, resource: &str, item: Value) -> i64 {
        self.with_backend(|b| b.insert(resource, item))
    }

    pub fn items(&self, resource: &str) -> Vec<Value> {
        self.with_backend(|b| b.list(resource))
    }

    pub fn movements(&self) -> Vec<Value> {
        self.with_backend(|b| b.movements.clone())
    }

    /// Estado da aplicação apontando para este servidor, com ou sem token.
    pub fn app(&self, token: Option<&str>) -> TestApp {
        let session = match token {
            Some(token) => MemorySessionStore::with_token(token),
            None => MemorySessionStore::new(),
        };
        let navigator = HistoryNavigator::new();
        let config = AppConfig {
            api_base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(5),
        };
        let state = AppState::new(config, Arc::new(session.clone()), Arc::new(navigator.clone()))
            .expect("app state");
        TestApp {
            state,
            session,
            navigator,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct TestApp {
    pub state: AppState,
    pub session: MemorySessionStore,
    pub navigator: HistoryNavigator,
}
