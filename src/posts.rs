use crate::session::require_admin;
use crate::store::Slot;
use crate::types::{Post, PublishError, Session};
use crate::validation::validate_post;
use chrono::{DateTime, Utc};

/// Appends a new story. Only an administrator may publish, and both fields
/// must be non-empty after trimming. On rejection the collection is untouched.
pub fn publish(
    posts: &mut Slot<Vec<Post>>,
    session: Option<&Session>,
    title: &str,
    body: &str,
    now: DateTime<Utc>,
) -> Result<Post, PublishError> {
    require_admin(session)?;
    validate_post(title, body)?;

    let post = Post {
        id: now.timestamp_millis(),
        title: title.to_string(),
        body: body.to_string(),
        likes: 0,
        dislikes: 0,
        created_at: now,
    };
    posts.update(|list| list.push(post.clone()));
    tracing::info!(id = post.id, "post published");
    Ok(post)
}

pub fn find(posts: &[Post], id: i64) -> Option<&Post> {
    posts.iter().find(|p| p.id == id)
}

/// Newest first.
pub fn newest_first(posts: &[Post]) -> impl Iterator<Item = &Post> {
    posts.iter().rev()
}

pub fn excerpt(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
