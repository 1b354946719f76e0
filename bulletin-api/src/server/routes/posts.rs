use crate::server::{
    Result, ServerError, ServerRouter,
    extract::{Json, Query},
};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use bulletin_common::model::{
    Id,
    post::{Post, PostDraft, PostMarker, PostUpdate},
    query::{PostSearch, PostSort},
};
use bulletin_store::store::PostStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_posts)
        .typed_post(create_post)
        .typed_get(search_posts)
        .typed_put(update_post)
        .typed_delete(delete_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/posts", rejection(ServerError))]
struct ListPostsPath();

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize)]
struct ListPostsQuery {
    sort: Option<String>,
    direction: Option<String>,
}

async fn list_posts(
    ListPostsPath(): ListPostsPath,
    State(store): State<Arc<PostStore>>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<Post>>> {
    let sort = PostSort::from_params(query.sort.as_deref(), query.direction.as_deref())?;
    let posts = store.list(sort).await?;

    Ok(Json(posts))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/posts/search", rejection(ServerError))]
struct SearchPostsPath();

async fn search_posts(
    SearchPostsPath(): SearchPostsPath,
    State(store): State<Arc<PostStore>>,
    Query(search): Query<PostSearch>,
) -> Result<Json<Vec<Post>>> {
    let posts = store.search(&search).await?;

    Ok(Json(posts))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/posts", rejection(ServerError))]
struct CreatePostPath();

async fn create_post(
    CreatePostPath(): CreatePostPath,
    State(store): State<Arc<PostStore>>,
    Json(draft): Json<PostDraft>,
) -> Result<(StatusCode, Json<Post>)> {
    let post = store.create(draft.validate()?).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/posts/{id}", rejection(ServerError))]
struct UpdatePostPath {
    id: Id<PostMarker>,
}

async fn update_post(
    UpdatePostPath { id }: UpdatePostPath,
    State(store): State<Arc<PostStore>>,
    Json(update): Json<PostUpdate>,
) -> Result<Json<Vec<Post>>> {
    let posts = store
        .update(id, update)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(posts))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/posts/{id}", rejection(ServerError))]
struct DeletePostPath {
    id: Id<PostMarker>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
struct DeleteConfirmation {
    #[serde(rename = "Message")]
    message: String,
}

async fn delete_post(
    DeletePostPath { id }: DeletePostPath,
    State(store): State<Arc<PostStore>>,
) -> Result<Json<DeleteConfirmation>> {
    store
        .delete(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(DeleteConfirmation {
        message: format!("Post with id {id} has been deleted successfully."),
    }))
}
