//! In-memory repository implementation.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use postcache_core::blog::{
    generate_seed_data, Category, Comment, CommentWithAuthor, FollowStats, NewUser, Post,
    PostWithDetails, SeedData, Tag, User, UserComment, UserDetail, UserNotification, UserPost,
    UserProfile, UserStats, STATUS_PUBLISHED,
};
use postcache_core::storage::{
    Pagination, PostRepository, RepositoryError, Result, UserDetailRepository, UserRepository,
};

const LATEST_COMMENTS: usize = 5;
const RECENT_POSTS: usize = 5;
const RECENT_COMMENTS: usize = 5;
const UNREAD_NOTIFICATIONS: usize = 10;
const COMMENT_APPROVED: &str = "approved";

/// A user row plus the account columns that only the detail view exposes.
#[derive(Debug, Clone)]
struct Account {
    user: User,
    status: String,
    email_verified: bool,
    last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    fn new(user: User, email_verified: bool) -> Self {
        Self {
            user,
            status: "active".to_string(),
            email_verified,
            last_login_at: None,
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i64, Account>,
    profiles: HashMap<i64, UserProfile>,
    categories: HashMap<i64, Category>,
    tags: HashMap<i64, Tag>,
    posts: HashMap<i64, Post>,
    /// (post_id, tag_id)
    post_tags: Vec<(i64, i64)>,
    comments: Vec<Comment>,
    /// (follower_id, following_id)
    follows: Vec<(i64, i64)>,
    notifications: Vec<(i64, UserNotification)>,
    next_user_id: i64,
}

impl Tables {
    fn from_seed(seed: SeedData) -> Self {
        let next_user_id = seed.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            users: seed
                .users
                .into_iter()
                .map(|u| (u.id, Account::new(u, true)))
                .collect(),
            profiles: seed.profiles.into_iter().collect(),
            categories: seed.categories.into_iter().map(|c| (c.id, c)).collect(),
            tags: seed.tags.into_iter().map(|t| (t.id, t)).collect(),
            posts: seed.posts.into_iter().map(|p| (p.id, p)).collect(),
            post_tags: seed.post_tags,
            comments: seed.comments,
            follows: seed.follows,
            notifications: seed.notifications,
            next_user_id,
        }
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|a| a.user.email == email && Some(a.user.id) != except)
    }

    /// Joins a post with author, category, and tags. `None` if the author is gone.
    fn join(&self, post: &Post) -> Option<PostWithDetails> {
        let author = self.users.get(&post.user_id)?;
        let profile = self.profiles.get(&post.user_id);

        let mut details = PostWithDetails::new(post.clone(), author.user.name.clone());
        details.author_display_name = profile.and_then(|p| p.display_name.clone());
        details.author_avatar_url = profile.and_then(|p| p.avatar_url.clone());
        if let Some(category) = post.category_id.and_then(|id| self.categories.get(&id)) {
            details = details.with_category(category);
        }
        Some(details.with_tags(self.tags_for(post.id)))
    }

    fn tags_for(&self, post_id: i64) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .post_tags
            .iter()
            .filter(|(post, _)| *post == post_id)
            .filter_map(|(_, tag)| self.tags.get(tag).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }

    fn latest_comments(&self, post_id: i64) -> Vec<CommentWithAuthor> {
        let mut comments: Vec<&Comment> = self
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && c.status == COMMENT_APPROVED)
            .collect();
        comments.sort_by_key(|c| Reverse(c.created_at));

        comments
            .into_iter()
            .filter_map(|c| {
                let author = self.users.get(&c.user_id)?;
                let profile = self.profiles.get(&c.user_id);
                Some(CommentWithAuthor {
                    comment: c.clone(),
                    author_username: author.user.name.clone(),
                    author_display_name: profile.and_then(|p| p.display_name.clone()),
                    author_avatar_url: profile.and_then(|p| p.avatar_url.clone()),
                })
            })
            .take(LATEST_COMMENTS)
            .collect()
    }

    /// Visible posts matching `filter`, most recently published first.
    fn published(&self, filter: impl Fn(&Post) -> bool) -> Vec<PostWithDetails> {
        let mut posts: Vec<PostWithDetails> = self
            .posts
            .values()
            .filter(|p| p.is_visible() && filter(p))
            .filter_map(|p| self.join(p))
            .collect();
        posts.sort_by_key(|d| (Reverse(d.post.published_at), Reverse(d.post.id)));
        posts
    }

    /// A single visible post with its latest comments.
    fn published_one(&self, post: Option<&Post>) -> Option<PostWithDetails> {
        let post = post.filter(|p| p.is_visible())?;
        let mut details = self.join(post)?;
        details.latest_comments = self.latest_comments(post.id);
        Some(details)
    }

    fn detail(&self, id: i64) -> Result<UserDetail> {
        let account = self
            .users
            .get(&id)
            .ok_or_else(|| RepositoryError::not_found("User", id))?;

        let follow_stats = FollowStats {
            follower_count: self.follows.iter().filter(|(_, to)| *to == id).count() as i64,
            following_count: self.follows.iter().filter(|(from, _)| *from == id).count() as i64,
        };

        let published = self
            .posts
            .values()
            .filter(|p| p.user_id == id && p.status == STATUS_PUBLISHED);
        let mut stats = UserStats::default();
        for post in published {
            stats.post_count += 1;
            stats.total_views += i64::from(post.view_count);
            stats.total_likes += i64::from(post.like_count);
        }
        stats.comment_count = self
            .comments
            .iter()
            .filter(|c| c.user_id == id && c.status == COMMENT_APPROVED)
            .count() as i64;

        let mut own_posts: Vec<&Post> = self.posts.values().filter(|p| p.user_id == id).collect();
        own_posts.sort_by_key(|p| Reverse(p.created_at));
        let recent_posts = own_posts
            .into_iter()
            .take(RECENT_POSTS)
            .map(UserPost::from)
            .collect();

        let mut own_comments: Vec<&Comment> =
            self.comments.iter().filter(|c| c.user_id == id).collect();
        own_comments.sort_by_key(|c| Reverse(c.created_at));
        let recent_comments = own_comments
            .into_iter()
            .filter_map(|c| {
                let post = self.posts.get(&c.post_id)?;
                Some(UserComment {
                    id: c.id,
                    post_id: c.post_id,
                    post_title: post.title.clone(),
                    content: c.content.clone(),
                    status: c.status.clone(),
                    like_count: c.like_count,
                    created_at: c.created_at,
                })
            })
            .take(RECENT_COMMENTS)
            .collect();

        let mut unread: Vec<&UserNotification> = self
            .notifications
            .iter()
            .filter(|(user_id, n)| *user_id == id && !n.is_read)
            .map(|(_, n)| n)
            .collect();
        unread.sort_by_key(|n| Reverse(n.created_at));

        Ok(UserDetail {
            id,
            username: account.user.name.clone(),
            email: account.user.email.clone(),
            status: account.status.clone(),
            email_verified: account.email_verified,
            last_login_at: account.last_login_at,
            created_at: account.user.created_at,
            updated_at: account.user.updated_at,
            profile: self.profiles.get(&id).cloned(),
            follow_stats,
            stats,
            recent_posts,
            recent_comments,
            unread_notifications: unread.into_iter().take(UNREAD_NOTIFICATIONS).cloned().collect(),
        })
    }

    /// Removes a user and every row that references them.
    fn remove_user(&mut self, id: i64) -> Option<Account> {
        let account = self.users.remove(&id)?;

        self.profiles.remove(&id);
        let removed_posts: Vec<i64> = self
            .posts
            .values()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        self.posts.retain(|_, p| p.user_id != id);
        self.post_tags
            .retain(|(post, _)| !removed_posts.contains(post));
        self.comments
            .retain(|c| c.user_id != id && !removed_posts.contains(&c.post_id));
        self.follows.retain(|(from, to)| *from != id && *to != id);
        self.notifications.retain(|(user_id, _)| *user_id != id);

        Some(account)
    }
}

/// In-memory storage backend.
///
/// Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a repository holding the demo data set.
    pub fn with_demo_data() -> Self {
        Self::from_seed(generate_seed_data(Utc::now()))
    }

    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::from_seed(seed))),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().map(|a| a.user.clone()).collect();
        users.sort_by_key(|u| (Reverse(u.created_at), Reverse(u.id)));
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> Result<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .map(|a| a.user.clone())
            .ok_or_else(|| RepositoryError::not_found("User", id))
    }

    async fn create(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email.clone(),
            });
        }

        let id = tables.next_user_id.max(1);
        tables.next_user_id = id + 1;
        let created = user.clone().into_user(id, Utc::now());
        tables
            .users
            .insert(id, Account::new(created.clone(), false));
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, Some(user.id)) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email.clone(),
            });
        }

        let account = tables
            .users
            .get_mut(&user.id)
            .ok_or_else(|| RepositoryError::not_found("User", user.id))?;
        account.user = User {
            created_at: account.user.created_at,
            updated_at: Utc::now(),
            ..user.clone()
        };
        Ok(account.user.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .remove_user(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("User", id))
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository {
    async fn find_all_with_details(&self, page: Pagination) -> Result<Vec<PostWithDetails>> {
        let tables = self.tables.read().await;
        let posts = tables.published(|_| true);
        Ok(page.apply(&posts).to_vec())
    }

    async fn find_by_id_with_details(&self, id: i64) -> Result<PostWithDetails> {
        let tables = self.tables.read().await;
        tables
            .published_one(tables.posts.get(&id))
            .ok_or_else(|| RepositoryError::not_found("Post", id))
    }

    async fn find_by_slug_with_details(&self, slug: &str) -> Result<PostWithDetails> {
        let tables = self.tables.read().await;
        tables
            .published_one(tables.posts.values().find(|p| p.slug == slug))
            .ok_or_else(|| RepositoryError::not_found("Post", slug))
    }

    async fn find_by_category_with_details(
        &self,
        category_slug: &str,
        page: Pagination,
    ) -> Result<Vec<PostWithDetails>> {
        let tables = self.tables.read().await;
        let Some(category_id) = tables
            .categories
            .values()
            .find(|c| c.slug == category_slug)
            .map(|c| c.id)
        else {
            return Ok(Vec::new());
        };

        let posts = tables.published(|p| p.category_id == Some(category_id));
        Ok(page.apply(&posts).to_vec())
    }

    async fn find_by_tag_with_details(
        &self,
        tag_slug: &str,
        page: Pagination,
    ) -> Result<Vec<PostWithDetails>> {
        let tables = self.tables.read().await;
        let Some(tag_id) = tables
            .tags
            .values()
            .find(|t| t.slug == tag_slug)
            .map(|t| t.id)
        else {
            return Ok(Vec::new());
        };

        let posts = tables.published(|p| tables.post_tags.contains(&(p.id, tag_id)));
        Ok(page.apply(&posts).to_vec())
    }

    async fn find_featured_with_details(&self, limit: i64) -> Result<Vec<PostWithDetails>> {
        let tables = self.tables.read().await;
        let posts = tables.published(|p| p.is_featured);
        Ok(Pagination::new(limit, 0).apply(&posts).to_vec())
    }

    async fn total_count(&self) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().filter(|p| p.is_visible()).count() as i64)
    }

    async fn increment_view_count(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        let post = tables
            .posts
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Post", id))?;
        post.view_count = post.view_count.saturating_add(1);
        Ok(())
    }
}

#[async_trait]
impl UserDetailRepository for InMemoryRepository {
    async fn find_detail_by_id(&self, id: i64) -> Result<UserDetail> {
        self.tables.read().await.detail(id)
    }

    async fn find_detail_by_username(&self, username: &str) -> Result<UserDetail> {
        let tables = self.tables.read().await;
        let id = tables
            .users
            .values()
            .find(|a| a.user.name == username)
            .map(|a| a.user.id)
            .ok_or_else(|| RepositoryError::not_found("User", username))?;
        tables.detail(id)
    }
}
