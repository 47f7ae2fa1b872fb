//! Posts client - CRUD over `/api/posts`

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::sanitize::FieldPolicy;

use super::base::{self, ApiError};

/// A post as returned by the backend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned post id
    pub post_id: i64,
    /// Author account id
    pub user_id: i64,
    /// Post body (sanitized rich text)
    pub content: String,
    /// Optional attached image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Creation timestamp, server-local
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Payload for creating or updating a post
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// Post body; may carry basic formatting
    pub content: String,
    /// Optional image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl NewPost {
    /// Sanitizes the payload before submission
    ///
    /// The body keeps a safe formatting subset; the image URL is scheme
    /// restricted and discarded entirely if it does not conform.
    pub fn sanitized(self) -> Self {
        Self {
            content: FieldPolicy::RichText.apply(&self.content),
            image: self.image.map(|url| FieldPolicy::RestrictedUrl.apply(&url)),
        }
    }
}

/// Client for the posts resource
///
/// Mutating calls are stamped with the session credential immediately before
/// dispatch and their payload is sanitized first; reads are anonymous.
pub struct PostsApi {
    session: Arc<Session>,
}

impl PostsApi {
    /// Creates a posts client over an existing session
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Fetches all posts, `GET /api/posts`
    pub async fn list(&self) -> Result<Vec<Post>, ApiError> {
        let response = self
            .session
            .http()
            .get(self.session.url("/api/posts"))
            .send()
            .await?;
        base::read_json(response).await
    }

    /// Fetches one user's posts, `GET /api/posts/user/{id}`
    pub async fn by_user(&self, user_id: i64) -> Result<Vec<Post>, ApiError> {
        let response = self
            .session
            .http()
            .get(self.session.url(&format!("/api/posts/user/{user_id}")))
            .send()
            .await?;
        base::read_json(response).await
    }

    /// Fetches a single post, `GET /api/posts/{id}`
    pub async fn get(&self, post_id: i64) -> Result<Post, ApiError> {
        let response = self
            .session
            .http()
            .get(self.session.url(&format!("/api/posts/{post_id}")))
            .send()
            .await?;
        base::read_json(response).await
    }

    /// Creates a post, `POST /api/posts`
    pub async fn create(&self, post: NewPost) -> Result<Post, ApiError> {
        let builder = self
            .session
            .http()
            .post(self.session.url("/api/posts"))
            .json(&post.sanitized());
        let response = self.session.stamp(builder).send().await?;
        base::read_json(response).await
    }

    /// Updates a post, `PUT /api/posts/{id}`
    pub async fn update(&self, post_id: i64, post: NewPost) -> Result<Post, ApiError> {
        let builder = self
            .session
            .http()
            .put(self.session.url(&format!("/api/posts/{post_id}")))
            .json(&post.sanitized());
        let response = self.session.stamp(builder).send().await?;
        base::read_json(response).await
    }

    /// Deletes a post, `DELETE /api/posts/{id}`
    pub async fn delete(&self, post_id: i64) -> Result<(), ApiError> {
        let builder = self
            .session
            .http()
            .delete(self.session.url(&format!("/api/posts/{post_id}")));
        let response = self.session.stamp(builder).send().await?;
        base::read_empty(response).await
    }
}
