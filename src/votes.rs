use crate::store::Slot;
use crate::types::{Post, VoteRecord, VoteType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Counted { post_id: i64, vote: VoteType, total: u32 },
    AlreadyVoted(VoteType),
    UnknownPost,
}

/// Casts one vote for a post from this profile.
///
/// The first vote for an id is final: any later vote of either type is a
/// no-op. Votes for ids with no matching post are ignored and not recorded.
pub fn cast_vote(
    posts: &mut Slot<Vec<Post>>,
    votes: &mut Slot<VoteRecord>,
    post_id: i64,
    vote: VoteType,
) -> VoteOutcome {
    if let Some(previous) = votes.get().get(&post_id) {
        return VoteOutcome::AlreadyVoted(*previous);
    }
    if !posts.get().iter().any(|p| p.id == post_id) {
        return VoteOutcome::UnknownPost;
    }

    let total = posts.update(|list| {
        let mut total = 0;
        if let Some(post) = list.iter_mut().find(|p| p.id == post_id) {
            let counter = match vote {
                VoteType::Likes => &mut post.likes,
                VoteType::Dislikes => &mut post.dislikes,
            };
            *counter = counter.saturating_add(1);
            total = *counter;
        }
        total
    });
    votes.update(|record| {
        record.insert(post_id, vote);
    });

    tracing::debug!(post_id, %vote, total, "vote counted");
    VoteOutcome::Counted {
        post_id,
        vote,
        total,
    }
}

pub fn vote_for(votes: &VoteRecord, post_id: i64) -> Option<VoteType> {
    votes.get(&post_id).copied()
}
