//! Domain entities - the core business objects.

mod caller;
mod discussion;
mod post;

pub use caller::{ADMIN_ROLE, Caller, Roles};
pub use discussion::{DiscussionCategory, NewTopic, Topic, TopicSummary};
pub use post::{MAX_TITLE_LEN, NewPost, Post};
