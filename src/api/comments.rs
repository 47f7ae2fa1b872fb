//! Comments client - `/api/comments`

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::auth::Session;
use crate::sanitize::FieldPolicy;

use super::base::{self, ApiError};

/// A comment as returned by the backend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Server-assigned comment id
    pub comment_id: i64,
    /// Author account id
    pub user_id: i64,
    /// Post this comment belongs to
    pub post_id: i64,
    /// Comment body (sanitized rich text)
    pub content: String,
    /// Creation timestamp, server-local
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewComment {
    post_id: i64,
    content: String,
}

/// Client for the comments resource
pub struct CommentsApi {
    session: Arc<Session>,
}

impl CommentsApi {
    /// Creates a comments client over an existing session
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Creates a comment on a post, `POST /api/comments`
    ///
    /// The content is sanitized before submission.
    pub async fn create(&self, post_id: i64, content: &str) -> Result<Comment, ApiError> {
        let body = NewComment {
            post_id,
            content: FieldPolicy::RichText.apply(content),
        };
        let builder = self
            .session
            .http()
            .post(self.session.url("/api/comments"))
            .json(&body);
        let response = self.session.stamp(builder).send().await?;
        base::read_json(response).await
    }

    /// Fetches all comments on a post, `GET /api/comments/post/{id}`
    pub async fn for_post(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        let response = self
            .session
            .http()
            .get(self.session.url(&format!("/api/comments/post/{post_id}")))
            .send()
            .await?;
        base::read_json(response).await
    }

    /// Fetches the logged-in user's comments, `GET /api/comments/user`
    pub async fn for_current_user(&self) -> Result<Vec<Comment>, ApiError> {
        let builder = self
            .session
            .http()
            .get(self.session.url("/api/comments/user"));
        let response = self.session.stamp(builder).send().await?;
        base::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credential, MemoryStore};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_with_token(base_url: &str, token: &str) -> CommentsApi {
        let session = Arc::new(Session::with_store(base_url, Arc::new(MemoryStore::new())));
        session.remember(&Credential::bearer(token)).unwrap();
        CommentsApi::new(session)
    }

    #[tokio::test]
    async fn test_create_sanitizes_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/comments"))
            .and(header("Authorization", "Bearer tok-c"))
            .and(body_json(serde_json::json!({
                "postId": 5,
                "content": "nice post"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "commentId": 11,
                "userId": 7,
                "postId": 5,
                "content": "nice post"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_with_token(&server.uri(), "tok-c");
        let comment = api
            .create(5, "<script>alert(1)</script>nice post")
            .await
            .unwrap();

        assert_eq!(comment.comment_id, 11);
        assert_eq!(comment.post_id, 5);
    }

    #[tokio::test]
    async fn test_for_post_is_anonymous() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/comments/post/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "commentId": 1, "userId": 2, "postId": 5, "content": "first" }
            ])))
            .mount(&server)
            .await;

        let session = Arc::new(Session::with_store(
            server.uri(),
            Arc::new(MemoryStore::new()),
        ));
        let comments = CommentsApi::new(session).for_post(5).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "first");
    }
}
