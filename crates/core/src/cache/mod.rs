mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    post_key, post_slug_key, posts_all_key, posts_by_category_key, posts_by_tag_key,
    posts_featured_key, posts_total_count_key, user_invalidation_keys, user_key, users_all_key,
    POSTS_PATTERN, POSTS_TOTAL_COUNT_KEY, USERS_ALL_KEY,
};
pub use patterns::pattern_matches;
pub use serialization::{deserialize, serialize, SerializationError};
pub use traits::Cache;
