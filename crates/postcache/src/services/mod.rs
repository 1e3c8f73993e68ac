//! Usecase layer.
//!
//! Each service is built twice by [`AppState`](crate::state::AppState): once over
//! the cache decorator and once over the raw data source. Handlers pick one per
//! request through [`ServicePair::select`].

mod error;
mod pair;
mod post;
mod user;
mod user_detail;
mod view_counter;

pub use error::ServiceError;
pub use pair::{CacheMode, ServicePair};
pub use post::{PostPage, PostService};
pub use user::UserService;
pub use user_detail::UserDetailService;
pub use view_counter::{ViewCountRecorder, ViewCountWorker};
