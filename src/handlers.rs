use crate::{
    error::AppError,
    pages::{render_post, Page, View},
    posts,
    quiz::AnswerOutcome,
    reports::{self, Acknowledgment},
    session,
    state::{AppState, SharedState},
    types::{AnswerForm, LoginForm, PasswordForm, PostForm, PublishError, ReportForm, VoteType},
    votes::{self, VoteOutcome},
};
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use chrono::Utc;
use std::sync::MutexGuard;

pub const PUBLISH_ACK: &str = "¡Historia publicada con éxito!";

fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>, AppError> {
    state.lock().map_err(|_| AppError::StatePoisoned)
}

pub async fn home(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let s = lock(&state)?;
    Ok(Html(Page::Home.render(&View::new(&s, Utc::now()))))
}

pub async fn page(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let s = lock(&state)?;
    Ok(Html(Page::from_slug(&slug).render(&View::new(&s, Utc::now()))))
}

pub async fn security(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let s = lock(&state)?;
    Ok(Html(Page::Security.render(&View::new(&s, Utc::now()))))
}

/// Evaluates a password sent in the form body, so it never shows up in the
/// request line.
pub async fn check_password(
    State(state): State<SharedState>,
    Form(form): Form<PasswordForm>,
) -> Result<Html<String>, AppError> {
    let s = lock(&state)?;
    let view = View::new(&s, Utc::now()).with_password(&form.password);
    Ok(Html(Page::Security.render(&view)))
}

pub async fn post_detail(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let s = lock(&state)?;
    render_post(&View::new(&s, Utc::now()), id)
        .map(Html)
        .ok_or(AppError::PostNotFound(id))
}

pub async fn vote(
    State(state): State<SharedState>,
    Path((id, vote_type)): Path<(i64, String)>,
) -> Result<Redirect, AppError> {
    let vote: VoteType = vote_type.parse()?;
    let mut guard = lock(&state)?;
    let s = &mut *guard;

    match votes::cast_vote(&mut s.posts, &mut s.votes, id, vote) {
        VoteOutcome::Counted { .. } => {}
        VoteOutcome::AlreadyVoted(previous) => {
            tracing::debug!(id, %previous, "vote ignored, already cast");
        }
        VoteOutcome::UnknownPost => return Err(AppError::PostNotFound(id)),
    }
    Ok(Redirect::to(&format!("/grooming/{id}")))
}

pub async fn submit_report(
    State(state): State<SharedState>,
    Form(form): Form<ReportForm>,
) -> Result<Redirect, AppError> {
    let mut s = lock(&state)?;
    match reports::submit(&mut s.reports, &form.title, &form.description, Utc::now()) {
        Ok((_, ack)) => s.view.report_ack = Some(ack),
        Err(e) => tracing::debug!(error = %e, "report rejected"),
    }
    Ok(Redirect::to("/#reportes"))
}

pub async fn answer_quiz(
    State(state): State<SharedState>,
    Form(form): Form<AnswerForm>,
) -> Result<Redirect, AppError> {
    let mut s = lock(&state)?;
    if s.phishing.answer(form.question, form.option) == AnswerOutcome::OutOfRange {
        return Err(AppError::Malformed(format!(
            "no option {} for question {}",
            form.option, form.question
        )));
    }
    Ok(Redirect::to("/phishing"))
}

pub async fn reset_quiz(State(state): State<SharedState>) -> Result<Redirect, AppError> {
    lock(&state)?.phishing.reset();
    Ok(Redirect::to("/phishing"))
}

pub async fn login(
    State(state): State<SharedState>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let mut s = lock(&state)?;
    let error = match session::login(&mut s.session, &form.email, &form.password) {
        Ok(_) => None,
        Err(e) => Some(e.to_string()),
    };
    s.view.login_error = error;
    Ok(Redirect::to("/admin"))
}

pub async fn logout(State(state): State<SharedState>) -> Result<Redirect, AppError> {
    let mut s = lock(&state)?;
    session::logout(&mut s.session);
    s.view.publish_ack = None;
    Ok(Redirect::to("/admin"))
}

pub async fn publish(
    State(state): State<SharedState>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    let mut guard = lock(&state)?;
    let s = &mut *guard;
    let now = Utc::now();

    match posts::publish(&mut s.posts, s.session.get().as_ref(), &form.title, &form.body, now) {
        Ok(_) => s.view.publish_ack = Some(Acknowledgment::new(PUBLISH_ACK, now)),
        Err(PublishError::Auth(e)) => tracing::info!(error = %e, "publish refused"),
        Err(PublishError::Validation(e)) => tracing::debug!(error = %e, "publish rejected"),
    }
    Ok(Redirect::to("/admin"))
}
