//! SQLite repository implementation.
//!
//! Implements the repository traits from `postcache_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Params, Row};
use tokio_rusqlite::Connection;

use postcache_core::blog::{NewUser, PostWithDetails, SeedData, User, UserDetail};
use postcache_core::storage::{
    Pagination, PostRepository, RepositoryError, Result, UserDetailRepository, UserRepository,
};

use super::conversions::{
    format_datetime, format_optional_datetime, row_to_comment_with_author, row_to_notification,
    row_to_post_with_details, row_to_tag, row_to_user, row_to_user_comment, row_to_user_detail,
    row_to_user_post,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

const LATEST_COMMENTS: i64 = 5;
const RECENT_POSTS: i64 = 5;
const RECENT_COMMENTS: i64 = 5;
const UNREAD_NOTIFICATIONS: i64 = 10;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

fn query_all<T, P: Params>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
    map: fn(&Row) -> rusqlite::Result<T>,
) -> rusqlite::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let items = stmt
        .query_map(params, map)?
        .collect::<rusqlite::Result<Vec<T>>>()?;
    Ok(items)
}

fn count(conn: &rusqlite::Connection, sql: &str, id: i64) -> rusqlite::Result<i64> {
    conn.query_row(sql, [id], |row| row.get(0))
}

fn with_tags(
    conn: &rusqlite::Connection,
    mut post: PostWithDetails,
) -> rusqlite::Result<PostWithDetails> {
    post.tags = query_all(conn, schema::SELECT_TAGS_FOR_POST, [post.id()], row_to_tag)?;
    Ok(post)
}

fn query_posts<P: Params>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
) -> rusqlite::Result<Vec<PostWithDetails>> {
    query_all(conn, sql, params, row_to_post_with_details)?
        .into_iter()
        .map(|post| with_tags(conn, post))
        .collect()
}

/// Loads a single post with tags and its latest approved comments.
fn query_post<P: Params>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
) -> rusqlite::Result<PostWithDetails> {
    let post = conn.query_row(sql, params, row_to_post_with_details)?;
    let mut post = with_tags(conn, post)?;
    post.latest_comments = query_all(
        conn,
        schema::SELECT_LATEST_COMMENTS,
        params![post.id(), LATEST_COMMENTS],
        row_to_comment_with_author,
    )?;
    Ok(post)
}

fn load_user_detail(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<UserDetail> {
    let mut detail = conn.query_row(schema::SELECT_ACCOUNT_WITH_PROFILE, [id], row_to_user_detail)?;

    detail.follow_stats.follower_count = count(conn, schema::COUNT_FOLLOWERS, id)?;
    detail.follow_stats.following_count = count(conn, schema::COUNT_FOLLOWING, id)?;

    let (post_count, total_views, total_likes): (i64, i64, i64) =
        conn.query_row(schema::SELECT_POST_STATS, [id], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?;
    detail.stats.post_count = post_count;
    detail.stats.total_views = total_views;
    detail.stats.total_likes = total_likes;
    detail.stats.comment_count = count(conn, schema::COUNT_APPROVED_COMMENTS_BY_USER, id)?;

    detail.recent_posts = query_all(
        conn,
        schema::SELECT_RECENT_POSTS_BY_USER,
        params![id, RECENT_POSTS],
        row_to_user_post,
    )?;
    detail.recent_comments = query_all(
        conn,
        schema::SELECT_RECENT_COMMENTS_BY_USER,
        params![id, RECENT_COMMENTS],
        row_to_user_comment,
    )?;
    detail.unread_notifications = query_all(
        conn,
        schema::SELECT_UNREAD_NOTIFICATIONS,
        params![id, UNREAD_NOTIFICATIONS],
        row_to_notification,
    )?;

    Ok(detail)
}

fn insert_seed(tx: &rusqlite::Transaction, seed: &SeedData) -> rusqlite::Result<()> {
    for user in &seed.users {
        tx.execute(
            schema::INSERT_SEED_USER,
            params![
                user.id,
                user.name,
                user.email,
                user.age,
                format_datetime(&user.created_at),
                format_datetime(&user.updated_at),
            ],
        )?;
    }

    for (user_id, p) in &seed.profiles {
        tx.execute(
            schema::INSERT_PROFILE,
            params![
                user_id,
                p.first_name,
                p.last_name,
                p.display_name,
                p.bio,
                p.avatar_url,
                p.birth_date,
                p.gender,
                p.country_code,
                p.timezone,
                p.language,
                p.phone_number,
                p.website_url,
            ],
        )?;
    }

    for c in &seed.categories {
        tx.execute(
            schema::INSERT_CATEGORY,
            params![
                c.id,
                c.name,
                c.slug,
                c.description,
                c.parent_id,
                c.display_order,
                c.is_active,
                format_datetime(&c.created_at),
                format_datetime(&c.updated_at),
            ],
        )?;
    }

    for t in &seed.tags {
        tx.execute(
            schema::INSERT_TAG,
            params![
                t.id,
                t.name,
                t.slug,
                t.description,
                t.usage_count,
                format_datetime(&t.created_at),
                format_datetime(&t.updated_at),
            ],
        )?;
    }

    for p in &seed.posts {
        tx.execute(
            schema::INSERT_POST,
            params![
                p.id,
                p.user_id,
                p.category_id,
                p.title,
                p.slug,
                p.content,
                p.excerpt,
                p.status,
                format_optional_datetime(p.published_at),
                p.view_count,
                p.like_count,
                p.comment_count,
                p.is_featured,
                format_datetime(&p.created_at),
                format_datetime(&p.updated_at),
            ],
        )?;
    }

    for (post_id, tag_id) in &seed.post_tags {
        tx.execute(schema::INSERT_POST_TAG, params![post_id, tag_id])?;
    }

    for c in &seed.comments {
        tx.execute(
            schema::INSERT_COMMENT,
            params![
                c.id,
                c.post_id,
                c.user_id,
                c.parent_id,
                c.content,
                c.status,
                c.like_count,
                c.is_edited,
                format_datetime(&c.created_at),
                format_datetime(&c.updated_at),
            ],
        )?;
    }

    let now = format_datetime(&Utc::now());
    for (follower, following) in &seed.follows {
        tx.execute(schema::INSERT_FOLLOW, params![follower, following, now])?;
    }

    for (user_id, n) in &seed.notifications {
        tx.execute(
            schema::INSERT_NOTIFICATION,
            params![
                n.id,
                user_id,
                n.kind,
                n.title,
                n.message,
                n.link_url,
                n.is_read,
                format_datetime(&n.created_at),
                format_optional_datetime(n.read_at),
            ],
        )?;
    }

    Ok(())
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for users, posts, and user details.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Loads `seed` in one transaction if the database has no users yet.
    ///
    /// Returns whether anything was inserted.
    pub async fn seed_if_empty(&self, seed: SeedData) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let users: i64 = conn
                    .query_row(schema::COUNT_USERS, [], |row| row.get(0))
                    .map_err(wrap_err)?;
                if users > 0 {
                    return Ok(false);
                }

                let tx = conn.transaction().map_err(wrap_err)?;
                insert_seed(&tx, &seed).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(true)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Seed", "-"))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn find_all(&self) -> Result<Vec<User>> {
        self.conn
            .call(|conn| query_all(conn, schema::SELECT_USERS, [], row_to_user).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", "-"))
    }

    async fn find_by_id(&self, id: i64) -> Result<User> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_USER_BY_ID, [id], row_to_user)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id))
    }

    async fn create(&self, user: &NewUser) -> Result<User> {
        let name = user.name.clone();
        let email = user.email.clone();
        let age = user.age;
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_USER, params![name, email, age, now, now])
                    .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                conn.query_row(schema::SELECT_USER_BY_ID, [id], row_to_user)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", &user.email))
    }

    async fn update(&self, user: &User) -> Result<User> {
        let id = user.id;
        let name = user.name.clone();
        let email = user.email.clone();
        let age = user.age;
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_USER, params![id, name, email, age, now])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                conn.query_row(schema::SELECT_USER_BY_ID, [id], row_to_user)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_USER, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id))
    }
}

// ============================================================================
// PostRepository implementation
// ============================================================================

#[async_trait]
impl PostRepository for SqliteRepository {
    async fn find_all_with_details(&self, page: Pagination) -> Result<Vec<PostWithDetails>> {
        self.conn
            .call(move |conn| {
                query_posts(
                    conn,
                    schema::SELECT_POSTS_PAGE,
                    params![page.limit, page.offset],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Post", "-"))
    }

    async fn find_by_id_with_details(&self, id: i64) -> Result<PostWithDetails> {
        self.conn
            .call(move |conn| query_post(conn, schema::SELECT_POST_BY_ID, [id]).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Post", id))
    }

    async fn find_by_slug_with_details(&self, slug: &str) -> Result<PostWithDetails> {
        let slug_param = slug.to_string();

        self.conn
            .call(move |conn| {
                query_post(conn, schema::SELECT_POST_BY_SLUG, [slug_param]).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Post", slug))
    }

    async fn find_by_category_with_details(
        &self,
        category_slug: &str,
        page: Pagination,
    ) -> Result<Vec<PostWithDetails>> {
        let slug = category_slug.to_string();

        self.conn
            .call(move |conn| {
                query_posts(
                    conn,
                    schema::SELECT_POSTS_BY_CATEGORY,
                    params![slug, page.limit, page.offset],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Category", category_slug))
    }

    async fn find_by_tag_with_details(
        &self,
        tag_slug: &str,
        page: Pagination,
    ) -> Result<Vec<PostWithDetails>> {
        let slug = tag_slug.to_string();

        self.conn
            .call(move |conn| {
                query_posts(
                    conn,
                    schema::SELECT_POSTS_BY_TAG,
                    params![slug, page.limit, page.offset],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Tag", tag_slug))
    }

    async fn find_featured_with_details(&self, limit: i64) -> Result<Vec<PostWithDetails>> {
        self.conn
            .call(move |conn| {
                query_posts(conn, schema::SELECT_FEATURED_POSTS, [limit]).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Post", "-"))
    }

    async fn total_count(&self) -> Result<i64> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::COUNT_PUBLISHED_POSTS, [], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Post", "-"))
    }

    async fn increment_view_count(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::INCREMENT_VIEW_COUNT, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Post", id))
    }
}

// ============================================================================
// UserDetailRepository implementation
// ============================================================================

#[async_trait]
impl UserDetailRepository for SqliteRepository {
    async fn find_detail_by_id(&self, id: i64) -> Result<UserDetail> {
        self.conn
            .call(move |conn| load_user_detail(conn, id).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id))
    }

    async fn find_detail_by_username(&self, username: &str) -> Result<UserDetail> {
        let name = username.to_string();

        self.conn
            .call(move |conn| {
                let id: i64 = conn
                    .query_row(schema::SELECT_USER_ID_BY_USERNAME, [name], |row| row.get(0))
                    .map_err(wrap_err)?;
                load_user_detail(conn, id).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", username))
    }
}
