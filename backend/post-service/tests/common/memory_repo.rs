//! In-memory PostRepo for HTTP integration tests
//!
//! Inputs are checked with the same statement builders the PostgreSQL
//! gateway uses, so invalid ids, drafts, pagination and sort columns fail
//! exactly as they would against a database.

use async_trait::async_trait;
use post_service::clock::{Clock, FixedClock};
use post_service::context::OpContext;
use post_service::db::{query_builder, PostRepo};
use post_service::error::PostError;
use post_service::models::{ListFilter, Post, PostCollection, PostDraft, SortColumn};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Clone)]
pub struct MemoryPostRepo {
    posts: Arc<Mutex<HashMap<String, Post>>>,
    clock: FixedClock,
    /// When set, every call fails with this error after input checks
    failure: Arc<Mutex<Option<PostError>>>,
}

impl MemoryPostRepo {
    pub fn new(clock: FixedClock) -> Self {
        Self {
            posts: Arc::new(Mutex::new(HashMap::new())),
            clock,
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn fail_with(&self, err: PostError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn stored(&self, id: &str) -> Option<Post> {
        self.posts.lock().unwrap().get(id).cloned()
    }

    fn check_failure(&self) -> Result<(), PostError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn compare(a: &Post, b: &Post, column: SortColumn) -> Ordering {
    let primary = match column {
        SortColumn::Content => a.content.cmp(&b.content),
        SortColumn::Title => a.title.cmp(&b.title),
        SortColumn::Category => a.category.cmp(&b.category),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        // PostgreSQL sorts NULL after every value in ascending order
        SortColumn::UpdatedAt => match (a.updated_at, b.updated_at) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl PostRepo for MemoryPostRepo {
    async fn create(&self, ctx: &OpContext, draft: &PostDraft) -> Result<Post, PostError> {
        ctx.run(async {
            let id = draft
                .requested_id()
                .map(str::to_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            let now = self.clock.now();
            query_builder::insert_post(&id, draft, now)?;
            self.check_failure()?;

            let mut posts = self.posts.lock().unwrap();
            if posts.contains_key(&id) {
                return Err(PostError::Storage("create"));
            }
            let post = Post {
                id: id.clone(),
                user_id: draft.user_id.clone(),
                content: draft.content.clone(),
                title: draft.title.clone(),
                likes: draft.likes,
                dislikes: draft.dislikes,
                views: draft.views,
                category: draft.category.clone(),
                created_at: now,
                updated_at: None,
            };
            posts.insert(id, post.clone());
            Ok(post)
        })
        .await?
    }

    async fn get(&self, ctx: &OpContext, id: &str) -> Result<Post, PostError> {
        ctx.run(async {
            query_builder::select_post(id)?;
            self.check_failure()?;
            self.stored(id)
                .ok_or_else(|| PostError::NotFound(format!("post {id}")))
        })
        .await?
    }

    async fn update(&self, ctx: &OpContext, id: &str, draft: &PostDraft) -> Result<Post, PostError> {
        ctx.run(async {
            let now = self.clock.now();
            query_builder::update_post(id, draft, now)?;
            self.check_failure()?;

            let mut posts = self.posts.lock().unwrap();
            let post = posts
                .get_mut(id)
                .ok_or_else(|| PostError::NotFound(format!("post {id}")))?;
            post.user_id = draft.user_id.clone();
            post.content = draft.content.clone();
            post.title = draft.title.clone();
            post.likes = draft.likes;
            post.dislikes = draft.dislikes;
            post.views = draft.views;
            post.category = draft.category.clone();
            post.updated_at = Some(now);
            Ok(post.clone())
        })
        .await?
    }

    async fn delete(&self, ctx: &OpContext, id: &str) -> Result<(), PostError> {
        ctx.run(async {
            query_builder::delete_post(id)?;
            self.check_failure()?;
            self.posts.lock().unwrap().remove(id);
            Ok(())
        })
        .await?
    }

    async fn list(&self, ctx: &OpContext, filter: &ListFilter) -> Result<PostCollection, PostError> {
        ctx.run(async {
            query_builder::list_posts(filter)?;
            self.check_failure()?;
            let window = filter.page_window()?;
            let column = filter.sort_column()?;

            let mut posts: Vec<Post> = self
                .posts
                .lock()
                .unwrap()
                .values()
                .filter(|p| filter.owner().map_or(true, |owner| p.user_id == owner))
                .cloned()
                .collect();
            posts.sort_by(|a, b| compare(a, b, column));

            let page = posts
                .into_iter()
                .skip(window.offset as usize)
                .take(window.limit as usize)
                .collect::<Vec<_>>();
            Ok(PostCollection::from(page))
        })
        .await?
    }
}
