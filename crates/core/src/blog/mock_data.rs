//! Demo data used to seed the in-memory store and the SQLite demo database.

use chrono::{DateTime, Duration, Utc};

use super::types::{
    Category, Comment, NewUser, Post, Tag, User, UserNotification, UserProfile,
};

/// A complete, internally consistent set of demo rows.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<User>,
    pub profiles: Vec<(i64, UserProfile)>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub posts: Vec<Post>,
    /// (post_id, tag_id)
    pub post_tags: Vec<(i64, i64)>,
    pub comments: Vec<Comment>,
    /// (follower_id, following_id)
    pub follows: Vec<(i64, i64)>,
    /// (user_id, notification)
    pub notifications: Vec<(i64, UserNotification)>,
}

fn profile(display_name: &str, bio: &str) -> UserProfile {
    UserProfile {
        display_name: Some(display_name.to_string()),
        bio: Some(bio.to_string()),
        avatar_url: Some(format!(
            "https://avatars.example.com/{}.png",
            display_name.to_lowercase().replace(' ', "-")
        )),
        language: Some("en".to_string()),
        ..UserProfile::default()
    }
}

fn category(id: i64, name: &str, slug: &str, now: DateTime<Utc>) -> Category {
    Category {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        parent_id: None,
        display_order: id as i32,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn tag(id: i64, name: &str, slug: &str, usage_count: i32, now: DateTime<Utc>) -> Tag {
    Tag {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        usage_count,
        created_at: now,
        updated_at: now,
    }
}

fn comment(id: i64, post_id: i64, user_id: i64, content: &str, at: DateTime<Utc>) -> Comment {
    Comment {
        id,
        post_id,
        user_id,
        parent_id: None,
        content: content.to_string(),
        status: "approved".to_string(),
        like_count: 0,
        is_edited: false,
        created_at: at,
        updated_at: at,
    }
}

fn post_at(post: Post, at: DateTime<Utc>) -> Post {
    Post {
        created_at: at,
        updated_at: at,
        ..post
    }
}

/// Generates the demo data set relative to `now`.
///
/// Three users, two categories, three tags, five posts (one of them a draft),
/// a handful of approved comments, follows, and unread notifications.
pub fn generate_seed_data(now: DateTime<Utc>) -> SeedData {
    let days = |n: i64| now - Duration::days(n);

    let users = vec![
        NewUser::new("alice", "alice@example.com")
            .with_age(31)
            .into_user(1, days(30)),
        NewUser::new("bob", "bob@example.com")
            .with_age(27)
            .into_user(2, days(20)),
        NewUser::new("carol", "carol@example.com").into_user(3, days(10)),
    ];

    let profiles = vec![
        (1, profile("Alice Liddell", "Writes about Rust and async I/O.")),
        (2, profile("Bob Tables", "Databases, indexes, and query plans.")),
    ];

    let categories = vec![
        category(1, "Rust", "rust", days(30)),
        category(2, "Databases", "databases", days(30)),
    ];

    let tags = vec![
        tag(1, "async", "async", 2, days(30)),
        tag(2, "caching", "caching", 3, days(30)),
        tag(3, "sql", "sql", 2, days(30)),
    ];

    let posts = vec![
        post_at(
            Post::new(
                1,
                1,
                "Getting started with Tokio",
                "getting-started-with-tokio",
                "Tokio is an asynchronous runtime for Rust.",
            )
            .with_category(1)
            .with_excerpt("A gentle introduction to async Rust.")
            .published(days(9))
            .featured()
            .with_counts(120, 14, 2),
            days(9),
        ),
        post_at(
            Post::new(
                2,
                1,
                "Cache-aside in practice",
                "cache-aside-in-practice",
                "Read through the cache, invalidate on write.",
            )
            .with_category(1)
            .published(days(7))
            .with_counts(80, 9, 1),
            days(7),
        ),
        post_at(
            Post::new(
                3,
                2,
                "Indexing for read-heavy workloads",
                "indexing-for-read-heavy-workloads",
                "Covering indexes turn random I/O into sequential scans.",
            )
            .with_category(2)
            .with_excerpt("When to add an index and when not to.")
            .published(days(5))
            .featured()
            .with_counts(45, 6, 1),
            days(5),
        ),
        post_at(
            Post::new(
                4,
                2,
                "Redis key design",
                "redis-key-design",
                "Namespaces, delimiters, and TTLs.",
            )
            .with_category(2)
            .published(days(3))
            .with_counts(30, 2, 0),
            days(3),
        ),
        post_at(
            Post::new(
                5,
                3,
                "Unfinished thoughts",
                "unfinished-thoughts",
                "Work in progress.",
            ),
            days(1),
        ),
    ];

    let post_tags = vec![(1, 1), (1, 2), (2, 2), (2, 1), (3, 3), (4, 2), (4, 3)];

    let comments = vec![
        comment(1, 1, 2, "Great intro, thanks!", days(8)),
        comment(2, 1, 3, "Could you cover select! next?", days(6)),
        comment(3, 2, 3, "What about stampedes?", days(6)),
        comment(4, 3, 1, "Covering indexes are underrated.", days(4)),
    ];

    let follows = vec![(2, 1), (3, 1), (1, 2)];

    let notifications = vec![
        (
            1,
            UserNotification {
                id: 1,
                kind: "follow".to_string(),
                title: "New follower".to_string(),
                message: "carol started following you".to_string(),
                link_url: Some("/users/username/carol/detail".to_string()),
                is_read: false,
                created_at: days(2),
                read_at: None,
            },
        ),
        (
            1,
            UserNotification {
                id: 2,
                kind: "comment".to_string(),
                title: "New comment".to_string(),
                message: "carol commented on Cache-aside in practice".to_string(),
                link_url: Some("/posts/2".to_string()),
                is_read: true,
                created_at: days(6),
                read_at: Some(days(5)),
            },
        ),
    ];

    SeedData {
        users,
        profiles,
        categories,
        tags,
        posts,
        post_tags,
        comments,
        follows,
        notifications,
    }
}
