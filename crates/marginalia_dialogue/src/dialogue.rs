//! The dialogue dispatcher.

use crate::state::{SelectedAuthor, SelectedStory, WorkflowState};
use marginalia_core::{
    AuthorId, CallbackPayload, CorrelationToken, Interaction, InteractionKind, Render, ReviewId,
    StoryId, UserId,
};
use marginalia_error::{MarginaliaResult, StaleSessionError, StaleSessionErrorKind};
use marginalia_session::{Session, SessionStore, SessionStoreConfig};
use marginalia_storage::StorageEngine;
use parking_lot::Mutex;
use tracing::instrument;

pub(crate) const STALE_TEXT: &str =
    "This keyboard is no longer active. Start the command again.";
pub(crate) const CANCEL_TEXT: &str = "Alright, maybe another time.";

const GREETING: &str = "Hi! I'm your reading diary.\n\
    Keep track of what you've read, rate it, and keep your notes here.\n\
    Send /help to see the commands.";

const HELP: &str = "Commands:\n\
    /add_author AUTHOR_NAME - add an author\n\
    /list_authors - list your authors\n\
    /remove_author - remove an author and everything by them\n\
    /add_story STORY_TITLE - add a story\n\
    /list_stories - list your stories\n\
    /remove_story - remove a story and your review of it\n\
    /add_review REVIEW_TEXT - review a story\n\
    /list_reviews - list your reviews\n\
    /remove_review - remove one of your reviews\n\
    /cancel - abandon whatever is in progress";

/// The dialogue state machine over one storage engine and one session
/// store.
///
/// Consumes inbound interactions and produces renders; all workflow
/// sequencing, correlation checks, and the confirmation protocol live
/// here. Shared freely across callers: the session store sits behind a
/// lock and the storage engine pools its connections.
pub struct Dialogue {
    storage: StorageEngine,
    sessions: Mutex<SessionStore<WorkflowState>>,
}

impl Dialogue {
    /// Create a dialogue with the default session TTL.
    pub fn new(storage: StorageEngine) -> Self {
        Self::with_session_config(storage, SessionStoreConfig::default())
    }

    /// Create a dialogue with an explicit session store configuration.
    pub fn with_session_config(storage: StorageEngine, config: SessionStoreConfig) -> Self {
        Self {
            storage,
            sessions: Mutex::new(SessionStore::new(config)),
        }
    }

    /// The storage engine backing this dialogue.
    pub fn storage(&self) -> &StorageEngine {
        &self.storage
    }

    /// Handle one inbound interaction to completion.
    ///
    /// Registers the user on first contact, then routes commands to
    /// workflow entry points and callbacks to the step the open session
    /// is waiting at. Recoverable conditions (bad input, stale sessions)
    /// come back as renders; only storage failures surface as errors.
    #[instrument(skip(self, interaction), fields(user = %interaction.user()))]
    pub fn handle(&self, interaction: &Interaction) -> MarginaliaResult<Render> {
        self.storage.register_user_if_absent(interaction.user())?;
        match interaction.kind() {
            InteractionKind::Command { name, args } => {
                self.handle_command(interaction.user(), interaction.token(), name, args)
            }
            InteractionKind::Callback { payload } => {
                self.handle_callback(interaction.user(), payload)
            }
        }
    }

    fn handle_command(
        &self,
        user: UserId,
        token: CorrelationToken,
        name: &str,
        args: &[String],
    ) -> MarginaliaResult<Render> {
        tracing::debug!(command = name, "dispatching command");
        match name {
            "start" => Ok(Render::text(GREETING)),
            "help" => Ok(Render::text(HELP)),
            "cancel" => Ok(self.cancel(user)),
            "add_author" => self.add_author_entry(user, token, args),
            "list_authors" => self.list_authors_command(user),
            "remove_author" => self.remove_author_entry(user, token),
            "add_story" => self.add_story_entry(user, token, args),
            "list_stories" => self.list_stories_command(user),
            "remove_story" => self.remove_story_entry(user, token),
            "add_review" => self.add_review_entry(user, token, args),
            "list_reviews" => self.list_reviews_command(user),
            "remove_review" => self.remove_review_entry(user, token),
            _ => {
                tracing::debug!(command = name, "unknown command");
                Ok(Render::text(HELP))
            }
        }
    }

    fn handle_callback(&self, user: UserId, raw: &str) -> MarginaliaResult<Render> {
        let payload = match CallbackPayload::decode(raw) {
            Ok(payload) => payload,
            Err(err) => return Ok(self.stale(err)),
        };
        let token = payload.token();

        let Some(session) = self.sessions.lock().take(token) else {
            return Ok(self.stale(StaleSessionError::new(
                StaleSessionErrorKind::UnknownToken(token.get()),
            )));
        };
        if session.user != user {
            // A foreign click must not end the owner's workflow.
            self.sessions.lock().insert(token, session);
            return Ok(self.stale(StaleSessionError::new(
                StaleSessionErrorKind::ForeignSession(token.get()),
            )));
        }

        match payload {
            CallbackPayload::Cancel { .. } => Ok(Render::text(format!(
                "{}\nStatus: cancelled",
                session.prompt
            ))),
            CallbackPayload::Confirm { label, answer, .. } => {
                self.finish(user, session, label, answer)
            }
            CallbackPayload::SelectAuthor { author, .. } => {
                self.select_author(user, token, session, author)
            }
            CallbackPayload::SelectStory { story, .. } => {
                self.select_story(user, token, session, story)
            }
            CallbackPayload::SelectReview { review, .. } => {
                self.select_review(user, token, session, review)
            }
            CallbackPayload::SelectRank { rank, .. } => {
                self.select_rank(user, token, session, rank)
            }
        }
    }

    /// Force-end the user's active workflow, whatever step it is at.
    fn cancel(&self, user: UserId) -> Render {
        let cleared = self.sessions.lock().clear_user(user);
        tracing::debug!(%user, cleared, "cancel command");
        Render::text(CANCEL_TEXT)
    }

    fn select_author(
        &self,
        user: UserId,
        token: CorrelationToken,
        session: Session<WorkflowState>,
        author: AuthorId,
    ) -> MarginaliaResult<Render> {
        let Some(record) = self.storage.get_author(user, author)? else {
            return Ok(self.stale(StaleSessionError::new(
                StaleSessionErrorKind::VanishedEntity("author".to_string()),
            )));
        };
        let author = SelectedAuthor::from(record);
        match session.state {
            WorkflowState::AddStorySelectAuthor { title } => {
                self.add_story_pick_author(user, token, title, author)
            }
            WorkflowState::AddReviewSelectAuthor { text } => {
                self.add_review_pick_author(user, token, text, author)
            }
            WorkflowState::RemoveAuthorSelect => self.remove_author_pick(user, token, author),
            WorkflowState::RemoveStorySelectAuthor => {
                self.remove_story_pick_author(user, token, author)
            }
            WorkflowState::RemoveReviewSelectAuthor => {
                self.remove_review_pick_author(user, token, author)
            }
            other => Ok(self.stale_step(&other)),
        }
    }

    fn select_story(
        &self,
        user: UserId,
        token: CorrelationToken,
        session: Session<WorkflowState>,
        story: StoryId,
    ) -> MarginaliaResult<Render> {
        let Some(record) = self.storage.get_story(user, story)? else {
            return Ok(self.stale(StaleSessionError::new(
                StaleSessionErrorKind::VanishedEntity("story".to_string()),
            )));
        };
        let story = SelectedStory::from(record);
        match session.state {
            WorkflowState::AddReviewSelectStory { text, author } => {
                self.add_review_pick_story(user, token, text, author, story)
            }
            WorkflowState::RemoveStorySelectStory { author } => {
                self.remove_story_pick_story(user, token, author, story)
            }
            WorkflowState::RemoveReviewSelectStory { author } => {
                self.remove_review_pick_story(user, token, author, story)
            }
            other => Ok(self.stale_step(&other)),
        }
    }

    fn select_review(
        &self,
        user: UserId,
        token: CorrelationToken,
        session: Session<WorkflowState>,
        review: ReviewId,
    ) -> MarginaliaResult<Render> {
        match session.state {
            WorkflowState::RemoveReviewSelectReview { author, story } => {
                self.remove_review_pick_review(user, token, author, story, review)
            }
            other => Ok(self.stale_step(&other)),
        }
    }

    fn select_rank(
        &self,
        user: UserId,
        token: CorrelationToken,
        session: Session<WorkflowState>,
        rank: i32,
    ) -> MarginaliaResult<Render> {
        match session.state {
            WorkflowState::AddReviewSelectRank {
                text,
                author,
                story,
            } => self.add_review_pick_rank(user, token, text, author, story, rank),
            other => Ok(self.stale_step(&other)),
        }
    }

    /// Open (or advance) the session for a workflow step.
    pub(crate) fn open_session(
        &self,
        token: CorrelationToken,
        user: UserId,
        prompt: &str,
        state: WorkflowState,
    ) {
        tracing::debug!(%token, step = state.step_name(), "session advances");
        self.sessions.lock().insert(
            token,
            Session {
                user,
                prompt: prompt.to_string(),
                state,
            },
        );
    }

    /// Log a stale-session condition and render the neutral message.
    ///
    /// Stale sessions are recovered locally: the workflow ends, the user
    /// is told to start over, the process is unaffected.
    pub(crate) fn stale(&self, err: StaleSessionError) -> Render {
        tracing::warn!(error = %err, "stale session rejected");
        Render::text(STALE_TEXT)
    }

    pub(crate) fn stale_step(&self, state: &WorkflowState) -> Render {
        self.stale(StaleSessionError::new(
            StaleSessionErrorKind::UnexpectedStep(state.step_name().to_string()),
        ))
    }
}
