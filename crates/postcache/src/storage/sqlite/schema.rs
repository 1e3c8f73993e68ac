//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Timestamps are stored as fixed-width RFC 3339 text so
//! that lexical order equals chronological order.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    age INTEGER,
    status TEXT NOT NULL DEFAULT 'active',
    email_verified INTEGER NOT NULL DEFAULT 0,
    last_login_at TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_profiles (
    user_id INTEGER PRIMARY KEY,
    first_name TEXT,
    last_name TEXT,
    display_name TEXT,
    bio TEXT,
    avatar_url TEXT,
    birth_date TEXT,
    gender TEXT,
    country_code TEXT,
    timezone TEXT,
    language_code TEXT,
    phone_number TEXT,
    website_url TEXT,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    description TEXT,
    parent_id INTEGER,
    display_order INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (parent_id) REFERENCES categories(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    description TEXT,
    usage_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    category_id INTEGER,
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    content TEXT NOT NULL,
    excerpt TEXT,
    status TEXT NOT NULL DEFAULT 'draft',
    published_at TEXT,
    view_count INTEGER NOT NULL DEFAULT 0,
    like_count INTEGER NOT NULL DEFAULT 0,
    comment_count INTEGER NOT NULL DEFAULT 0,
    is_featured INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS post_tags (
    post_id INTEGER NOT NULL,
    tag_id INTEGER NOT NULL,
    PRIMARY KEY (post_id, tag_id),
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
    FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY,
    post_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    parent_id INTEGER,
    content TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    like_count INTEGER NOT NULL DEFAULT 0,
    is_edited INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (parent_id) REFERENCES comments(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS user_follows (
    follower_id INTEGER NOT NULL,
    following_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (follower_id, following_id),
    FOREIGN KEY (follower_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (following_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS post_likes (
    post_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (post_id, user_id),
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    type TEXT NOT NULL,
    title TEXT NOT NULL,
    message TEXT NOT NULL,
    link_url TEXT,
    is_read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    read_at TEXT,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_posts_published ON posts(status, published_at);
CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id);
CREATE INDEX IF NOT EXISTS idx_posts_category_id ON posts(category_id);
CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id, created_at);
CREATE INDEX IF NOT EXISTS idx_comments_user_id ON comments(user_id);
CREATE INDEX IF NOT EXISTS idx_notifications_user_id ON notifications(user_id, is_read);
"#;

// User queries
//
// Expected columns for `row_to_user`: id, username, email, age, created_at, updated_at

pub const SELECT_USERS: &str = r#"
SELECT id, username, email, age, created_at, updated_at
FROM users
ORDER BY created_at DESC, id DESC
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, username, email, age, created_at, updated_at
FROM users
WHERE id = ?1
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (username, email, age, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET username = ?2, email = ?3, age = ?4, updated_at = ?5
WHERE id = ?1
"#;

pub const DELETE_USER: &str = "DELETE FROM users WHERE id = ?1";

// Post queries
//
// Every listing shares the same joined projection, read by `row_to_post_with_details`.

macro_rules! select_posts_with_details {
    ($tail:literal) => {
        concat!(
            r#"
SELECT
    p.id, p.user_id, p.category_id, p.title, p.slug, p.content, p.excerpt,
    p.status, p.published_at, p.view_count, p.like_count, p.comment_count,
    p.is_featured, p.created_at, p.updated_at,
    u.username, up.display_name, up.avatar_url,
    c.name, c.slug
FROM posts p
INNER JOIN users u ON p.user_id = u.id
LEFT JOIN user_profiles up ON u.id = up.user_id
LEFT JOIN categories c ON p.category_id = c.id
WHERE p.status = 'published' AND p.published_at IS NOT NULL
"#,
            $tail
        )
    };
}

pub const SELECT_POSTS_PAGE: &str = select_posts_with_details!(
    "ORDER BY p.published_at DESC, p.id DESC LIMIT ?1 OFFSET ?2"
);

pub const SELECT_POST_BY_ID: &str = select_posts_with_details!("AND p.id = ?1");

pub const SELECT_POST_BY_SLUG: &str = select_posts_with_details!("AND p.slug = ?1");

pub const SELECT_POSTS_BY_CATEGORY: &str = select_posts_with_details!(
    "AND c.slug = ?1 ORDER BY p.published_at DESC, p.id DESC LIMIT ?2 OFFSET ?3"
);

pub const SELECT_POSTS_BY_TAG: &str = select_posts_with_details!(
    "AND EXISTS (
    SELECT 1 FROM post_tags pt
    INNER JOIN tags t ON pt.tag_id = t.id
    WHERE pt.post_id = p.id AND t.slug = ?1
)
ORDER BY p.published_at DESC, p.id DESC LIMIT ?2 OFFSET ?3"
);

pub const SELECT_FEATURED_POSTS: &str = select_posts_with_details!(
    "AND p.is_featured = 1 ORDER BY p.published_at DESC, p.id DESC LIMIT ?1"
);

pub const COUNT_PUBLISHED_POSTS: &str = r#"
SELECT COUNT(*) FROM posts WHERE status = 'published' AND published_at IS NOT NULL
"#;

pub const INCREMENT_VIEW_COUNT: &str =
    "UPDATE posts SET view_count = view_count + 1 WHERE id = ?1";

pub const SELECT_TAGS_FOR_POST: &str = r#"
SELECT t.id, t.name, t.slug, t.description, t.usage_count, t.created_at, t.updated_at
FROM post_tags pt
INNER JOIN tags t ON pt.tag_id = t.id
WHERE pt.post_id = ?1
ORDER BY t.name
"#;

pub const SELECT_LATEST_COMMENTS: &str = r#"
SELECT
    c.id, c.post_id, c.user_id, c.parent_id, c.content, c.status,
    c.like_count, c.is_edited, c.created_at, c.updated_at,
    u.username, up.display_name, up.avatar_url
FROM comments c
INNER JOIN users u ON c.user_id = u.id
LEFT JOIN user_profiles up ON u.id = up.user_id
WHERE c.post_id = ?1 AND c.status = 'approved'
ORDER BY c.created_at DESC
LIMIT ?2
"#;

// User detail queries

pub const SELECT_ACCOUNT_WITH_PROFILE: &str = r#"
SELECT
    u.id, u.username, u.email, u.status, u.email_verified, u.last_login_at,
    u.created_at, u.updated_at,
    p.user_id, p.first_name, p.last_name, p.display_name, p.bio, p.avatar_url,
    p.birth_date, p.gender, p.country_code, p.timezone, p.language_code,
    p.phone_number, p.website_url
FROM users u
LEFT JOIN user_profiles p ON u.id = p.user_id
WHERE u.id = ?1
"#;

pub const SELECT_USER_ID_BY_USERNAME: &str = "SELECT id FROM users WHERE username = ?1";

pub const COUNT_FOLLOWERS: &str = "SELECT COUNT(*) FROM user_follows WHERE following_id = ?1";

pub const COUNT_FOLLOWING: &str = "SELECT COUNT(*) FROM user_follows WHERE follower_id = ?1";

pub const SELECT_POST_STATS: &str = r#"
SELECT COUNT(*), COALESCE(SUM(view_count), 0), COALESCE(SUM(like_count), 0)
FROM posts
WHERE user_id = ?1 AND status = 'published'
"#;

pub const COUNT_APPROVED_COMMENTS_BY_USER: &str =
    "SELECT COUNT(*) FROM comments WHERE user_id = ?1 AND status = 'approved'";

pub const SELECT_RECENT_POSTS_BY_USER: &str = r#"
SELECT id, title, slug, excerpt, status, published_at,
       view_count, like_count, comment_count, is_featured, created_at
FROM posts
WHERE user_id = ?1
ORDER BY created_at DESC
LIMIT ?2
"#;

pub const SELECT_RECENT_COMMENTS_BY_USER: &str = r#"
SELECT c.id, c.post_id, p.title, c.content, c.status, c.like_count, c.created_at
FROM comments c
INNER JOIN posts p ON c.post_id = p.id
WHERE c.user_id = ?1
ORDER BY c.created_at DESC
LIMIT ?2
"#;

pub const SELECT_UNREAD_NOTIFICATIONS: &str = r#"
SELECT id, type, title, message, link_url, is_read, created_at, read_at
FROM notifications
WHERE user_id = ?1 AND is_read = 0
ORDER BY created_at DESC
LIMIT ?2
"#;

// Demo data

pub const COUNT_USERS: &str = "SELECT COUNT(*) FROM users";

pub const INSERT_SEED_USER: &str = r#"
INSERT INTO users (id, username, email, age, status, email_verified, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, 'active', 1, ?5, ?6)
"#;

pub const INSERT_PROFILE: &str = r#"
INSERT INTO user_profiles (
    user_id, first_name, last_name, display_name, bio, avatar_url, birth_date,
    gender, country_code, timezone, language_code, phone_number, website_url
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
"#;

pub const INSERT_CATEGORY: &str = r#"
INSERT INTO categories (
    id, name, slug, description, parent_id, display_order, is_active, created_at, updated_at
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

pub const INSERT_TAG: &str = r#"
INSERT INTO tags (id, name, slug, description, usage_count, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const INSERT_POST: &str = r#"
INSERT INTO posts (
    id, user_id, category_id, title, slug, content, excerpt, status, published_at,
    view_count, like_count, comment_count, is_featured, created_at, updated_at
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
"#;

pub const INSERT_POST_TAG: &str = "INSERT INTO post_tags (post_id, tag_id) VALUES (?1, ?2)";

pub const INSERT_COMMENT: &str = r#"
INSERT INTO comments (
    id, post_id, user_id, parent_id, content, status, like_count, is_edited,
    created_at, updated_at
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

pub const INSERT_FOLLOW: &str = r#"
INSERT INTO user_follows (follower_id, following_id, created_at)
VALUES (?1, ?2, ?3)
"#;

pub const INSERT_NOTIFICATION: &str = r#"
INSERT INTO notifications (
    id, user_id, type, title, message, link_url, is_read, created_at, read_at
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;
