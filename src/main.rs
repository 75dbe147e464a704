//src/main.rs

use std::{env, sync::Arc};

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use saep_frontend::{
    config::{AppConfig, AppState},
    models::{Category, Customer, Product, Resource, StockLocation},
    services::{AuthService, LogViewer, MovementRecorder, ResourceController},
    session::{
        store::{ACCESS_KEY, USER_NAME_KEY},
        HistoryNavigator, MemorySessionStore, SessionStore,
    },
};

const USAGE: &str = "uso: saep-frontend <comando>
  login <email> <senha>
  listar <categorias|clientes|estoques|produtos> [busca]
  logs [--ativos]
  estoque";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env().context("Falha ao ler a configuração")?;

    // Sessão só em memória: o token pode vir de API_TOKEN
    let session = MemorySessionStore::new();
    if let Ok(token) = env::var("API_TOKEN") {
        session.set(ACCESS_KEY, &token);
    }
    let navigator = HistoryNavigator::new();

    let app_state = AppState::new(config, Arc::new(session.clone()), Arc::new(navigator))?;

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["login", email, password] => login(&app_state, &session, email, password).await,
        ["listar", resource, rest @ ..] => {
            let term = rest.join(" ");
            match *resource {
                "categorias" => list::<Category>(&app_state, &term).await,
                "clientes" => list::<Customer>(&app_state, &term).await,
                "estoques" => list::<StockLocation>(&app_state, &term).await,
                "produtos" => list::<Product>(&app_state, &term).await,
                other => bail!("Recurso desconhecido: {other}\n{USAGE}"),
            }
        }
        ["logs"] => logs(&app_state, false).await,
        ["logs", "--ativos"] => logs(&app_state, true).await,
        ["estoque"] => stock(&app_state).await,
        _ => bail!("{USAGE}"),
    }
}

async fn login(
    app_state: &AppState,
    session: &MemorySessionStore,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let auth = AuthService::new(app_state);
    if let Err(failure) = auth.login(email, password).await {
        for (field, messages) in &failure.field_errors {
            eprintln!("  {field}: {}", messages.join(", "));
        }
        bail!(failure.message);
    }

    let name = session.get(USER_NAME_KEY).unwrap_or_default();
    println!("Bem-vindo, {name}!");
    println!("API_TOKEN={}", session.get(ACCESS_KEY).unwrap_or_default());
    Ok(())
}

async fn list<R: Resource>(app_state: &AppState, term: &str) -> anyhow::Result<()> {
    let controller = ResourceController::<R>::new(app_state);
    controller.load().await;
    controller.set_search_text(term).await;

    let state = controller.snapshot().await;
    if let Some(message) = state.error_message {
        bail!(message);
    }

    for item in state.filtered_items() {
        println!("#{:<4} {}", item.id(), item.searchable_fields().join(" | "));
    }
    Ok(())
}

async fn logs(app_state: &AppState, only_active: bool) -> anyhow::Result<()> {
    let viewer = LogViewer::new(app_state);
    viewer.set_only_active(only_active).await;
    viewer.load().await;

    let state = viewer.snapshot().await;
    if let Some(message) = state.error_message {
        bail!(message);
    }

    for log in state.visible_logs() {
        let status = if log.is_active { "ativo" } else { "inativo" };
        println!(
            "#{:<4} {} {} ({status})",
            log.id,
            log.created_at.format("%d/%m/%Y %H:%M"),
            log.updated_at.format("%d/%m/%Y %H:%M"),
        );
    }
    Ok(())
}

async fn stock(app_state: &AppState) -> anyhow::Result<()> {
    let recorder = MovementRecorder::new(app_state);
    recorder.load().await;

    let state = recorder.snapshot().await;
    if let Some(message) = state.error_message {
        bail!(message);
    }

    for product in &state.products {
        let flag = if product.is_below_minimum() { "⚠️" } else { "" };
        println!(
            "{:<30} {:<12} atual {:>5} / mínimo {:>5} {flag}",
            product.name, product.sku, product.current_stock, product.minimum_stock
        );
    }
    println!("{} locais de estoque", state.stock_locations.len());
    Ok(())
}
