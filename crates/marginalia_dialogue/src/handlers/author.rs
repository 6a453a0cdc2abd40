//! The add-author and remove-author workflows.

use crate::dialogue::Dialogue;
use crate::format::format_authors;
use crate::keyboards::{authors_keyboard, confirm_keyboard};
use crate::state::{SelectedAuthor, WorkflowState};
use marginalia_core::{CorrelationToken, Render, UserId, WorkflowLabel};
use marginalia_error::MarginaliaResult;

const ADD_AUTHOR_USAGE: &str = "Add an author: /add_author AUTHOR_NAME";
const DUPLICATE_AUTHOR_TEXT: &str = "This author is already in your diary.";
const NO_AUTHORS_TEXT: &str = "You have no authors yet. Add one with /add_author.";

impl Dialogue {
    /// `/add_author NAME`: short-circuits on a known name, otherwise asks
    /// for confirmation.
    pub(crate) fn add_author_entry(
        &self,
        user: UserId,
        token: CorrelationToken,
        args: &[String],
    ) -> MarginaliaResult<Render> {
        let name = args.join(" ");
        let name = name.trim();
        if name.is_empty() {
            return Ok(Render::text(ADD_AUTHOR_USAGE));
        }
        if self.storage().find_author_id(user, name)?.is_some() {
            return Ok(Render::text(DUPLICATE_AUTHOR_TEXT));
        }
        let prompt = format!("Add author \"{name}\"?");
        let keyboard = confirm_keyboard(token, WorkflowLabel::AddAuthor)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::AddAuthorConfirm {
                name: name.to_string(),
            },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// `/list_authors`: names sorted alphabetically, one per line.
    pub(crate) fn list_authors_command(&self, user: UserId) -> MarginaliaResult<Render> {
        let authors = self.storage().list_authors_by_name(user)?;
        if authors.is_empty() {
            return Ok(Render::text(NO_AUTHORS_TEXT));
        }
        Ok(Render::text(format!(
            "Your authors:\n\n{}",
            format_authors(&authors)
        )))
    }

    /// `/remove_author`: opens the author selection keyboard.
    ///
    /// An empty shelf still renders the prompt with an empty grid; the
    /// selection control is valid either way.
    pub(crate) fn remove_author_entry(
        &self,
        user: UserId,
        token: CorrelationToken,
    ) -> MarginaliaResult<Render> {
        let authors = self.storage().list_authors(user)?;
        let prompt = "Pick an author";
        let keyboard = authors_keyboard(&authors, token)?;
        self.open_session(token, user, prompt, WorkflowState::RemoveAuthorSelect);
        Ok(Render::with_keyboard(prompt, keyboard))
    }

    /// Author picked for removal: warn about the cascade, ask to confirm.
    pub(crate) fn remove_author_pick(
        &self,
        user: UserId,
        token: CorrelationToken,
        author: SelectedAuthor,
    ) -> MarginaliaResult<Render> {
        let prompt = format!(
            "Remove author `{}`? All of their stories and your notes about them \
             will be removed as well",
            author.name
        );
        let keyboard = confirm_keyboard(token, WorkflowLabel::RemoveAuthor)?;
        self.open_session(
            token,
            user,
            &prompt,
            WorkflowState::RemoveAuthorConfirm { author },
        );
        Ok(Render::with_keyboard(prompt, keyboard))
    }
}
