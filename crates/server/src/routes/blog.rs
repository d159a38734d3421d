use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use models::{BlogPost, Category, Tag};
use serde::{Deserialize, Serialize};
use service::errors::ServiceError;
use tracing::info;

use crate::{errors::JsonApiError, routes::ServerState};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_number_of_posts", rename = "numberofposts")]
    pub number_of_posts: usize,
    #[serde(default, rename = "startindex")]
    pub start_index: usize,
}

fn default_number_of_posts() -> usize { 10 }

#[derive(Debug, Serialize, Deserialize)]
pub struct CountOutput {
    pub count: usize,
}

pub async fn list_blog_posts(
    State(state): State<ServerState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Vec<BlogPost>>, JsonApiError> {
    let posts = state.blog_api.get_blog_posts(q.number_of_posts, q.start_index).await?;
    Ok(Json(posts))
}

pub async fn blog_post_count(State(state): State<ServerState>) -> Result<Json<CountOutput>, JsonApiError> {
    let count = state.blog_api.get_blog_post_count().await?;
    Ok(Json(CountOutput { count }))
}

pub async fn get_blog_post(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, JsonApiError> {
    match state.blog_api.get_blog_post(&id).await? {
        Some(post) => Ok(Json(post)),
        None => Err(ServiceError::not_found("blog post").into()),
    }
}

pub async fn save_blog_post(
    State(state): State<ServerState>,
    Json(input): Json<BlogPost>,
) -> Result<Json<BlogPost>, JsonApiError> {
    input.validate()?;
    let saved = state.blog_api.save_blog_post(input).await?;
    info!(id = ?saved.id, title = %saved.title, "saved blog post");
    Ok(Json(saved))
}

pub async fn delete_blog_post(State(state): State<ServerState>, Path(id): Path<String>) -> StatusCode {
    state.blog_api.delete_blog_post(&id).await;
    info!(%id, "deleted blog post");
    StatusCode::NO_CONTENT
}

pub async fn list_categories(State(state): State<ServerState>) -> Result<Json<Vec<Category>>, JsonApiError> {
    Ok(Json(state.blog_api.get_categories().await?))
}

pub async fn get_category(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, JsonApiError> {
    state
        .blog_api
        .get_category(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("category").into())
}

pub async fn save_category(
    State(state): State<ServerState>,
    Json(input): Json<Category>,
) -> Result<Json<Category>, JsonApiError> {
    input.validate()?;
    let saved = state.blog_api.save_category(input).await?;
    info!(id = ?saved.id, name = %saved.name, "saved category");
    Ok(Json(saved))
}

pub async fn delete_category(State(state): State<ServerState>, Path(id): Path<String>) -> StatusCode {
    state.blog_api.delete_category(&id).await;
    StatusCode::NO_CONTENT
}

pub async fn list_tags(State(state): State<ServerState>) -> Result<Json<Vec<Tag>>, JsonApiError> {
    Ok(Json(state.blog_api.get_tags().await?))
}

pub async fn get_tag(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Tag>, JsonApiError> {
    state
        .blog_api
        .get_tag(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("tag").into())
}

pub async fn save_tag(State(state): State<ServerState>, Json(input): Json<Tag>) -> Result<Json<Tag>, JsonApiError> {
    input.validate()?;
    let saved = state.blog_api.save_tag(input).await?;
    info!(id = ?saved.id, name = %saved.name, "saved tag");
    Ok(Json(saved))
}

pub async fn delete_tag(State(state): State<ServerState>, Path(id): Path<String>) -> StatusCode {
    state.blog_api.delete_tag(&id).await;
    StatusCode::NO_CONTENT
}

pub async fn invalidate_cache(State(state): State<ServerState>) -> StatusCode {
    state.blog_api.invalidate_cache().await;
    StatusCode::NO_CONTENT
}
