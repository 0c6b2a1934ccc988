use crate::quiz::{phishing_quiz, QuizRunner};
use crate::reports::Acknowledgment;
use crate::store::{Slot, POSTS_KEY, REPORTS_KEY, SESSION_KEY, VOTES_KEY};
use crate::types::{Post, QuizError, Report, Session, VoteRecord};

/// Messages and quiz progress that live only as long as the process.
#[derive(Debug, Default)]
pub struct ViewState {
    pub report_ack: Option<Acknowledgment>,
    pub publish_ack: Option<Acknowledgment>,
    pub login_error: Option<String>,
}

pub struct AppState {
    pub session: Slot<Option<Session>>,
    pub posts: Slot<Vec<Post>>,
    pub reports: Slot<Vec<Report>>,
    pub votes: Slot<VoteRecord>,

    pub phishing: QuizRunner,
    pub view: ViewState,
}

impl AppState {
    pub fn new(db: sled::Db) -> Result<Self, QuizError> {
        let session = Slot::load(&db, SESSION_KEY, None);
        let posts = Slot::load(&db, POSTS_KEY, Vec::new());
        let reports = Slot::load(&db, REPORTS_KEY, Vec::new());
        let votes = Slot::load(&db, VOTES_KEY, VoteRecord::new());

        tracing::info!(
            posts = posts.get().len(),
            reports = reports.get().len(),
            votes = votes.get().len(),
            "loaded local state"
        );

        Ok(Self {
            session,
            posts,
            reports,
            votes,
            phishing: QuizRunner::new(phishing_quiz()?),
            view: ViewState::default(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.get().is_some()
    }
}

pub type SharedState = std::sync::Arc<std::sync::Mutex<AppState>>;
