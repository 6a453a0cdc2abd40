//! The add-story and remove-story workflows.

use crate::dialogue::Dialogue;
use crate::format::format_stories;
use crate::keyboards::{authors_keyboard, confirm_keyboard, stories_keyboard};
use crate::state::{SelectedAuthor, SelectedStory, WorkflowState};
use marginalia_core::{CorrelationToken, Render, UserId, WorkflowLabel};
use marginalia_error::MarginaliaResult;

const ADD_STORY_USAGE: &str = "Add a story: /add_story STORY_TITLE";
const DUPLICATE_STORY_TEXT: &str = "This story is already in your diary.";
const NO_STORIES_TEXT: &str = "You have no stories yet. Add one with /add_story.";

impl Dialogue {
    /// `/add_story TITLE`: opens the author selection keyboard.
    pub(crate) fn add_story_entry(
        &self,
        user: UserId,
        token: CorrelationToken,
        args: &[String],
    ) -> MarginaliaResult<Render> {
        let title = args.join(" ");
        let title = title.trim();
        if title.is_empty() {
            return Ok(Render::text(ADD_STORY_USAGE));
        }
        let authors = self.storage().list_authors(user)?;
        let prompt = format!("Who wrote `{title}`?");
        let keyboard = authors_keyboard(&authors, token)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::AddStorySelectAuthor {
                title: title.to_string(),
            },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// Author picked for a new story: short-circuits on a known `(author,
    /// title)` pair, otherwise asks for confirmation.
    pub(crate) fn add_story_pick_author(
        &self,
        user: UserId,
        token: CorrelationToken,
        title: String,
        author: SelectedAuthor,
    ) -> MarginaliaResult<Render> {
        if self
            .storage()
            .find_story_id(user, author.id, &title)?
            .is_some()
        {
            return Ok(Render::text(DUPLICATE_STORY_TEXT));
        }
        let prompt = format!("Add story `{title}` by `{}`?", author.name);
        let keyboard = confirm_keyboard(token, WorkflowLabel::AddStory)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::AddStoryConfirm { title, author },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// `/list_stories`: titles grouped under their author.
    pub(crate) fn list_stories_command(&self, user: UserId) -> MarginaliaResult<Render> {
        let stories = self.storage().list_stories(user, None)?;
        if stories.is_empty() {
            return Ok(Render::text(NO_STORIES_TEXT));
        }
        Ok(Render::text(format!(
            "Your stories:\n\n{}",
            format_stories(&stories)
        )))
    }

    /// `/remove_story`: opens the author selection keyboard.
    pub(crate) fn remove_story_entry(
        &self,
        user: UserId,
        token: CorrelationToken,
    ) -> MarginaliaResult<Render> {
        let authors = self.storage().list_authors(user)?;
        let prompt = "Pick an author";
        let keyboard = authors_keyboard(&authors, token)?;
        self.open_session(token, user, prompt, WorkflowState::RemoveStorySelectAuthor);
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// Author picked for removal: narrow down to one of their stories.
    pub(crate) fn remove_story_pick_author(
        &self,
        user: UserId,
        token: CorrelationToken,
        author: SelectedAuthor,
    ) -> MarginaliaResult<Render> {
        let stories = self.storage().list_stories(user, Some(author.id))?;
        let prompt = format!("Pick a story by `{}`", author.name);
        let keyboard = stories_keyboard(&stories, token)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::RemoveStorySelectStory { author },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// Story picked for removal: warn about the cascade, ask to confirm.
    pub(crate) fn remove_story_pick_story(
        &self,
        user: UserId,
        token: CorrelationToken,
        _author: SelectedAuthor,
        story: SelectedStory,
    ) -> MarginaliaResult<Render> {
        let prompt = format!(
            "Remove story `{}`? Your review of it (if any) will be removed too",
            story.title
        );
        let keyboard = confirm_keyboard(token, WorkflowLabel::RemoveStory)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::RemoveStoryConfirm { story },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }
}
