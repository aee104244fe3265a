use serde::Serialize;
use worker::{Context, Env, Request, Response, Result, RouteContext, Router};

use crate::error::ApiError;
use crate::models::{AGENT_ID_ENV, DEFAULT_AGENT_ID, INDEX_HTML};
use crate::upload;

#[derive(Debug, Clone)]
pub struct AppState {
    pub default_agent_id: String,
}

pub async fn handle(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let default_agent_id = env
        .var(AGENT_ID_ENV)
        .map(|value| value.to_string())
        .unwrap_or_else(|_| DEFAULT_AGENT_ID.to_string());

    let state = AppState { default_agent_id };

    Router::with_data(state)
        .get("/", index_route)
        .post_async("/upload", upload_route)
        .run(req, env)
        .await
}

fn index_route(_req: Request, _ctx: RouteContext<AppState>) -> Result<Response> {
    Response::from_html(INDEX_HTML)
}

async fn upload_route(mut req: Request, ctx: RouteContext<AppState>) -> Result<Response> {
    match upload_response(&mut req, &ctx.data).await {
        Ok(response) => Ok(response),
        Err(error) => {
            if error.status_code() >= 500 {
                worker::console_error!("roster upload failed: {error}");
            }
            error.into_response()
        }
    }
}

async fn upload_response(req: &mut Request, state: &AppState) -> std::result::Result<Response, ApiError> {
    let roster_upload = upload::read_upload(req, &state.default_agent_id).await?;
    let extraction = upload::convert_upload(&roster_upload)?;
    json_response(&extraction).map_err(ApiError::from)
}

fn json_response<T>(payload: &T) -> Result<Response>
where
    T: Serialize,
{
    let mut response = Response::from_json(payload)?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}
