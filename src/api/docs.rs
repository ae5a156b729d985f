//! OpenAPI document and Swagger UI page

use axum::{response::Html, Json};
use utoipa::OpenApi;

use crate::api::handlers;
use crate::types::{
    CreateTodoRequest, MessageResponse, Todo, TodoStatus, UpdateTodoRequest,
};

const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Todos API", description = "Create, list, update and delete todo items"),
    paths(
        handlers::hello,
        handlers::create_todo,
        handlers::list_todos,
        handlers::update_todo,
        handlers::delete_todo
    ),
    components(schemas(
        Todo,
        TodoStatus,
        CreateTodoRequest,
        UpdateTodoRequest,
        MessageResponse
    )),
    tags(
        (name = "Todos", description = "Todo item management"),
        (name = "Health", description = "Liveness check")
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Serve an interactive Swagger UI page backed by [`openapi_json`]
pub async fn swagger_ui() -> Html<String> {
    Html(render_swagger_ui(
        &ApiDoc::openapi().info.title,
        OPENAPI_JSON_PATH,
    ))
}

fn render_swagger_ui(title: &str, spec_url: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{spec_url}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##
    )
}
