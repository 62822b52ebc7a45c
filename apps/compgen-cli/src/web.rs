//! Web front end: the generator form and the generated-code view.
//!
//! Form values are turned into a `ComponentRequest` on every submission; the
//! only state kept between requests is the session's last generated component.

use anyhow::{Context, Result};
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use compgen_core::{
    CompgenError, ComponentRequest, ComponentRuntime, InputDescriptor, SessionState,
    ValidationErrors,
};
use minijinja::{Environment, HtmlEscape, context};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Number of input rows shown before the user picks a count.
const DEFAULT_ROW_COUNT: usize = 1;

/// Shared state of the web front end.
#[derive(Clone)]
pub struct AppState {
    runtime: Arc<ComponentRuntime>,
    session: Arc<RwLock<SessionState>>,
    pages: Arc<Environment<'static>>,
}

impl AppState {
    /// Creates the state around a runtime with a fresh session.
    pub fn new(runtime: ComponentRuntime) -> Result<Self> {
        Ok(Self {
            runtime: Arc::new(runtime),
            session: Arc::new(RwLock::new(SessionState::new())),
            pages: Arc::new(page_environment()?),
        })
    }

    fn render(&self, page: &str, ctx: minijinja::Value) -> Result<Html<String>, AppError> {
        let template = self
            .pages
            .get_template(page)
            .map_err(|e| AppError::Render(e.to_string()))?;
        template
            .render(ctx)
            .map(Html)
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

fn page_environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("base.html.j2", include_str!("../templates/base.html.j2"))
        .context("invalid base page template")?;
    env.add_template("index.html.j2", include_str!("../templates/index.html.j2"))
        .context("invalid form page template")?;
    env.add_template("code.html.j2", include_str!("../templates/code.html.j2"))
        .context("invalid code page template")?;
    env.add_template("error.html.j2", include_str!("../templates/error.html.j2"))
        .context("invalid error page template")?;
    Ok(env)
}

/// Builds the router with all pages.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form_page))
        .route("/generate", post(generate))
        .route("/code", get(code_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `bind_address` and serves until the process is stopped.
pub async fn serve(runtime: ComponentRuntime, bind_address: &str) -> Result<()> {
    let state = AppState::new(runtime)?;
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;

    info!("Serving component generator on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(state))
        .await
        .context("web server stopped unexpectedly")
}

/// One input row as shown on the form.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
struct FormRow {
    number: usize,
    name: String,
    display_name: String,
    description: String,
    errors: Vec<String>,
}

impl FormRow {
    fn empty(index: usize) -> Self {
        Self {
            number: index + 1,
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct FormQuery {
    count: Option<usize>,
}

/// Errors raised while building a page.
#[derive(Debug)]
enum AppError {
    Render(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Render(message) = self;
        error!("failed to render page: {}", message);

        // Templating itself failed, so the page is built by hand.
        let body = format!(
            "<!doctype html><html><body><h1>Internal error</h1><p>{}</p></body></html>",
            HtmlEscape(&message)
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}

fn clamp_count(count: Option<usize>, max_inputs: usize) -> usize {
    count.unwrap_or(DEFAULT_ROW_COUNT).min(max_inputs)
}

/// Reads `count` rows of `name_i`, `display_name_i`, `description_i` fields.
///
/// Missing fields read as empty strings, so a row left blank fails the
/// empty-name rule instead of disappearing.
fn request_from_form(fields: &HashMap<String, String>, count: usize) -> ComponentRequest {
    let field = |key: String| fields.get(&key).cloned().unwrap_or_default();

    (0..count)
        .map(|i| {
            InputDescriptor::new(
                field(format!("name_{i}")),
                field(format!("display_name_{i}")),
                field(format!("description_{i}")),
            )
        })
        .collect::<Vec<_>>()
        .into()
}

fn rows_with_errors(request: &ComponentRequest, errors: &ValidationErrors) -> Vec<FormRow> {
    request
        .inputs
        .iter()
        .enumerate()
        .map(|(index, input)| FormRow {
            number: index + 1,
            name: input.name.clone(),
            display_name: input.display_name.clone(),
            description: input.description.clone(),
            errors: errors.for_input(index).map(ToString::to_string).collect(),
        })
        .collect()
}

async fn form_page(
    State(state): State<AppState>,
    Query(query): Query<FormQuery>,
) -> Result<Html<String>, AppError> {
    let max_inputs = state.runtime.max_inputs();
    let count = clamp_count(query.count, max_inputs);
    let rows: Vec<FormRow> = (0..count).map(FormRow::empty).collect();

    state.render(
        "index.html.j2",
        context! {
            tab => "form",
            count => count,
            max_inputs => max_inputs,
            rows => rows,
            errors => Vec::<String>::new(),
        },
    )
}

async fn generate(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let max_inputs = state.runtime.max_inputs();
    let count = clamp_count(
        fields.get("count").and_then(|c| c.trim().parse().ok()),
        max_inputs,
    );
    let request = request_from_form(&fields, count);

    match state.runtime.submit(request.clone()).await {
        Ok(component) => {
            info!(inputs = component.input_count, "Code generated");
            state.session.write().await.record_success(component);
            Ok(Redirect::to("/code").into_response())
        }
        Err(CompgenError::Validation(errors)) => {
            warn!(issues = errors.len(), "Submission rejected");
            state.session.write().await.record_rejection();

            let page = state.render(
                "index.html.j2",
                context! {
                    tab => "form",
                    count => count,
                    max_inputs => max_inputs,
                    rows => rows_with_errors(&request, &errors),
                    errors => errors.messages(),
                },
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(err) => {
            state.session.write().await.record_failure();
            let status = match &err {
                CompgenError::Service(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error!(status = status.as_u16(), "Generation failed: {}", err);

            let page = state.render(
                "error.html.j2",
                context! {
                    tab => "form",
                    message => err.to_string(),
                },
            )?;
            Ok((status, page).into_response())
        }
    }
}

async fn code_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let session = state.session.read().await;
    let component = session.latest().map(|c| {
        context! {
            code => c.code.clone(),
            refined => c.refined,
            changed => c.changed_by_refinement(),
            input_count => c.input_count,
            generated_at => c.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    });

    state.render(
        "code.html.j2",
        context! {
            tab => "code",
            component => component,
            model => state.runtime.config.refine.model.clone(),
            stats => context! {
                generated => session.generated,
                rejected => session.rejected,
                failed => session.failed,
            },
        },
    )
}
