//! Static topics panel.

use axum::Json;

const TOPICS_TITLE: &str = "Discussed topics in the logistics sector";
const TOPICS_MARKDOWN: &str = include_str!("../topics.md");

/// GET /api/v1/topics
#[utoipa::path(get, path = "/api/v1/topics", tag = "Map",
    responses((status = 200, description = "Markdown panel of industry topics")))]
pub async fn get_topics() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "title": TOPICS_TITLE,
        "markdown": TOPICS_MARKDOWN,
    }))
}
