mod error;
mod mock_data;
mod operations;
mod requests;
mod types;

pub use error::{PostError, UserError};
pub use mock_data::{generate_seed_data, SeedData};
pub use operations::{
    apply_user_update, normalize_featured_limit, normalize_page, validate_new_user,
    validate_post_id, validate_slug, validate_user_id, validate_username, PageRequest,
    DEFAULT_FEATURED_LIMIT, DEFAULT_PAGE_SIZE, MAX_FEATURED_LIMIT, MAX_PAGE_SIZE,
};
pub use requests::{CreateUserRequest, FeaturedQuery, PageQuery, UpdateUserRequest};
pub use types::{
    Category, Comment, CommentWithAuthor, FollowStats, NewUser, Post, PostWithDetails, Tag, User,
    UserComment, UserDetail, UserNotification, UserPost, UserProfile, UserStats, STATUS_DRAFT,
    STATUS_PUBLISHED,
};
