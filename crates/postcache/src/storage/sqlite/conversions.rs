//! SQLite row conversion functions.
//!
//! Pure functions mapping rows to domain types. Each expects the column order of
//! the matching query in `schema`.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use postcache_core::blog::{
    Comment, CommentWithAuthor, Post, PostWithDetails, Tag, User, UserComment, UserDetail,
    UserNotification, UserPost, UserProfile,
};

// ============================================================================
// Users
// ============================================================================

/// Columns: id, username, email, age, created_at, updated_at
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
        created_at: parse_datetime(row, 4)?,
        updated_at: parse_datetime(row, 5)?,
    })
}

// ============================================================================
// Posts
// ============================================================================

/// Columns: the 15 post columns, then author username, display name, avatar,
/// category name, category slug. Tags and comments are loaded separately.
pub fn row_to_post_with_details(row: &Row) -> rusqlite::Result<PostWithDetails> {
    let post = Post {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category_id: row.get(2)?,
        title: row.get(3)?,
        slug: row.get(4)?,
        content: row.get(5)?,
        excerpt: row.get(6)?,
        status: row.get(7)?,
        published_at: parse_optional_datetime(row, 8)?,
        view_count: row.get(9)?,
        like_count: row.get(10)?,
        comment_count: row.get(11)?,
        is_featured: row.get(12)?,
        created_at: parse_datetime(row, 13)?,
        updated_at: parse_datetime(row, 14)?,
    };

    let mut details = PostWithDetails::new(post, row.get::<_, String>(15)?);
    details.author_display_name = row.get(16)?;
    details.author_avatar_url = row.get(17)?;
    details.category_name = row.get(18)?;
    details.category_slug = row.get(19)?;
    Ok(details)
}

/// Columns: id, name, slug, description, usage_count, created_at, updated_at
pub fn row_to_tag(row: &Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        usage_count: row.get(4)?,
        created_at: parse_datetime(row, 5)?,
        updated_at: parse_datetime(row, 6)?,
    })
}

/// Columns: the 10 comment columns, then author username, display name, avatar.
pub fn row_to_comment_with_author(row: &Row) -> rusqlite::Result<CommentWithAuthor> {
    Ok(CommentWithAuthor {
        comment: Comment {
            id: row.get(0)?,
            post_id: row.get(1)?,
            user_id: row.get(2)?,
            parent_id: row.get(3)?,
            content: row.get(4)?,
            status: row.get(5)?,
            like_count: row.get(6)?,
            is_edited: row.get(7)?,
            created_at: parse_datetime(row, 8)?,
            updated_at: parse_datetime(row, 9)?,
        },
        author_username: row.get(10)?,
        author_display_name: row.get(11)?,
        author_avatar_url: row.get(12)?,
    })
}

// ============================================================================
// User detail
// ============================================================================

/// Columns: 8 account columns, then `p.user_id` (NULL when there is no profile)
/// followed by the 12 profile columns.
///
/// Counters and lists are left empty for the caller to fill.
pub fn row_to_user_detail(row: &Row) -> rusqlite::Result<UserDetail> {
    let has_profile = row.get::<_, Option<i64>>(8)?.is_some();
    let profile = if has_profile {
        Some(UserProfile {
            first_name: row.get(9)?,
            last_name: row.get(10)?,
            display_name: row.get(11)?,
            bio: row.get(12)?,
            avatar_url: row.get(13)?,
            birth_date: row.get(14)?,
            gender: row.get(15)?,
            country_code: row.get(16)?,
            timezone: row.get(17)?,
            language: row.get(18)?,
            phone_number: row.get(19)?,
            website_url: row.get(20)?,
        })
    } else {
        None
    };

    Ok(UserDetail {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        status: row.get(3)?,
        email_verified: row.get(4)?,
        last_login_at: parse_optional_datetime(row, 5)?,
        created_at: parse_datetime(row, 6)?,
        updated_at: parse_datetime(row, 7)?,
        profile,
        follow_stats: Default::default(),
        stats: Default::default(),
        recent_posts: Vec::new(),
        recent_comments: Vec::new(),
        unread_notifications: Vec::new(),
    })
}

/// Columns: id, title, slug, excerpt, status, published_at, view_count,
/// like_count, comment_count, is_featured, created_at
pub fn row_to_user_post(row: &Row) -> rusqlite::Result<UserPost> {
    Ok(UserPost {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        excerpt: row.get(3)?,
        status: row.get(4)?,
        published_at: parse_optional_datetime(row, 5)?,
        view_count: row.get(6)?,
        like_count: row.get(7)?,
        comment_count: row.get(8)?,
        is_featured: row.get(9)?,
        created_at: parse_datetime(row, 10)?,
    })
}

/// Columns: id, post_id, post title, content, status, like_count, created_at
pub fn row_to_user_comment(row: &Row) -> rusqlite::Result<UserComment> {
    Ok(UserComment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        post_title: row.get(2)?,
        content: row.get(3)?,
        status: row.get(4)?,
        like_count: row.get(5)?,
        created_at: parse_datetime(row, 6)?,
    })
}

/// Columns: id, type, title, message, link_url, is_read, created_at, read_at
pub fn row_to_notification(row: &Row) -> rusqlite::Result<UserNotification> {
    Ok(UserNotification {
        id: row.get(0)?,
        kind: row.get(1)?,
        title: row.get(2)?,
        message: row.get(3)?,
        link_url: row.get(4)?,
        is_read: row.get(5)?,
        created_at: parse_datetime(row, 6)?,
        read_at: parse_optional_datetime(row, 7)?,
    })
}

// ============================================================================
// Timestamps
// ============================================================================

/// Formats a timestamp for storage.
///
/// Always UTC with microsecond precision (`2024-06-15T10:30:00.000000Z`), so
/// string comparison in `ORDER BY` is chronological.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn format_optional_datetime(dt: Option<DateTime<Utc>>) -> Option<String> {
    dt.as_ref().map(format_datetime)
}

fn parse_datetime_str(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_datetime(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: String = row.get(idx)?;
    parse_datetime_str(idx, &value)
}

fn parse_optional_datetime(row: &Row, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let value: Option<String> = row.get(idx)?;
    value.map(|s| parse_datetime_str(idx, &s)).transpose()
}
