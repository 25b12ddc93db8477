//! Post service - orchestration over a [`PostRepo`]
//!
//! Failures keep their kind and gain the name of the operation that
//! produced them.
use crate::context::OpContext;
use crate::db::PostRepo;
use crate::error::{PostError, Result, ServiceError};
use crate::models::{ListFilter, Post, PostCollection, PostDraft};
use std::sync::Arc;

const OP_CREATE: &str = "PostService - create_post";
const OP_GET: &str = "PostService - get_post";
const OP_UPDATE: &str = "PostService - update_post";
const OP_DELETE: &str = "PostService - delete_post";
const OP_LIST: &str = "PostService - list_posts";
const OP_LIKE: &str = "PostService - like_post";
const OP_DISLIKE: &str = "PostService - dislike_post";

/// Which counter a reaction bumps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    Like,
    Dislike,
}

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepo>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepo>) -> Self {
        Self { repo }
    }

    pub async fn create_post(&self, ctx: &OpContext, draft: &PostDraft) -> Result<Post> {
        self.repo
            .create(ctx, draft)
            .await
            .map_err(|e| ServiceError::new(OP_CREATE, e))
    }

    pub async fn get_post(&self, ctx: &OpContext, id: &str) -> Result<Post> {
        self.repo
            .get(ctx, id)
            .await
            .map_err(|e| ServiceError::new(OP_GET, e))
    }

    /// Replace every column of post `id` with the draft's values.
    pub async fn update_post(&self, ctx: &OpContext, id: &str, draft: &PostDraft) -> Result<Post> {
        self.repo
            .update(ctx, id, draft)
            .await
            .map_err(|e| ServiceError::new(OP_UPDATE, e))
    }

    pub async fn delete_post(&self, ctx: &OpContext, id: &str) -> Result<()> {
        self.repo
            .delete(ctx, id)
            .await
            .map_err(|e| ServiceError::new(OP_DELETE, e))
    }

    pub async fn list_posts(&self, ctx: &OpContext, filter: &ListFilter) -> Result<PostCollection> {
        self.repo
            .list(ctx, filter)
            .await
            .map_err(|e| ServiceError::new(OP_LIST, e))
    }

    pub async fn like_post(&self, ctx: &OpContext, id: &str) -> Result<Post> {
        self.react(ctx, id, Reaction::Like)
            .await
            .map_err(|e| ServiceError::new(OP_LIKE, e))
    }

    pub async fn dislike_post(&self, ctx: &OpContext, id: &str) -> Result<Post> {
        self.react(ctx, id, Reaction::Dislike)
            .await
            .map_err(|e| ServiceError::new(OP_DISLIKE, e))
    }

    /// Read, bump one counter, write back. Concurrent reactions on the same
    /// post are last-writer-wins.
    async fn react(
        &self,
        ctx: &OpContext,
        id: &str,
        reaction: Reaction,
    ) -> std::result::Result<Post, PostError> {
        let current = self.repo.get(ctx, id).await?;
        let mut draft = current.to_draft();

        let counter = match reaction {
            Reaction::Like => &mut draft.likes,
            Reaction::Dislike => &mut draft.dislikes,
        };
        *counter = counter
            .checked_add(1)
            .ok_or_else(|| PostError::invalid("reaction counter is at its maximum"))?;

        tracing::debug!(post_id = %id, ?reaction, "applying reaction");
        self.repo.update(ctx, &current.id, &draft).await
    }
}
