//! Keyboard builders for selection and confirmation steps.
//!
//! Selection keyboards carry identifiers and the correlation token only;
//! the drafts they advance stay in the session store.

use marginalia_core::{
    CallbackPayload, ConfirmAnswer, CorrelationToken, Keyboard, KeyboardButton, Rank,
    WorkflowLabel,
};
use marginalia_error::MarginaliaResult;
use marginalia_storage::{AuthorRecord, ReviewRecord, StoryRecord};

/// Columns in author, story, and review selection keyboards.
pub const SELECT_COLUMNS: usize = 2;
/// Columns in the rank keyboard.
pub const RANK_COLUMNS: usize = 3;

/// Characters of review text shown on a review selection button.
const PREVIEW_CHARS: usize = 15;

/// Truncate review text to a short button-sized preview.
pub fn review_preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

fn cancel_button(token: CorrelationToken) -> MarginaliaResult<KeyboardButton> {
    Ok(KeyboardButton::new(
        "Cancel",
        CallbackPayload::Cancel { token }.encode()?,
    ))
}

/// One button per author, two columns.
pub fn authors_keyboard(
    authors: &[AuthorRecord],
    token: CorrelationToken,
) -> MarginaliaResult<Keyboard> {
    let mut buttons = Vec::with_capacity(authors.len());
    for author in authors {
        buttons.push(KeyboardButton::new(
            author.name.clone(),
            CallbackPayload::SelectAuthor {
                token,
                author: author.id,
            }
            .encode()?,
        ));
    }
    Ok(Keyboard::grid(buttons, SELECT_COLUMNS))
}

/// One button per story, two columns.
pub fn stories_keyboard(
    stories: &[StoryRecord],
    token: CorrelationToken,
) -> MarginaliaResult<Keyboard> {
    let mut buttons = Vec::with_capacity(stories.len());
    for story in stories {
        buttons.push(KeyboardButton::new(
            story.title.clone(),
            CallbackPayload::SelectStory {
                token,
                story: story.id,
            }
            .encode()?,
        ));
    }
    Ok(Keyboard::grid(buttons, SELECT_COLUMNS))
}

/// One button per review, labeled with a short text preview, plus a
/// cancel button.
pub fn reviews_keyboard(
    reviews: &[ReviewRecord],
    token: CorrelationToken,
) -> MarginaliaResult<Keyboard> {
    let mut buttons = Vec::with_capacity(reviews.len() + 1);
    for review in reviews {
        buttons.push(KeyboardButton::new(
            review_preview(&review.text),
            CallbackPayload::SelectReview {
                token,
                review: review.id,
            }
            .encode()?,
        ));
    }
    buttons.push(cancel_button(token)?);
    Ok(Keyboard::grid(buttons, SELECT_COLUMNS))
}

/// Rank buttons 0 through 5 in three columns, plus a cancel button.
pub fn rank_keyboard(token: CorrelationToken) -> MarginaliaResult<Keyboard> {
    let mut buttons = Vec::new();
    for rank in Rank::all() {
        buttons.push(KeyboardButton::new(
            rank.to_string(),
            CallbackPayload::SelectRank {
                token,
                rank: rank.get(),
            }
            .encode()?,
        ));
    }
    buttons.push(cancel_button(token)?);
    Ok(Keyboard::grid(buttons, RANK_COLUMNS))
}

/// The affirm/decline pair of the confirmation protocol, carrying the
/// workflow label the guard checks on click.
pub fn confirm_keyboard(
    token: CorrelationToken,
    label: WorkflowLabel,
) -> MarginaliaResult<Keyboard> {
    let affirm = KeyboardButton::new(
        "Yes",
        CallbackPayload::Confirm {
            token,
            label,
            answer: ConfirmAnswer::Affirm,
        }
        .encode()?,
    );
    let decline = KeyboardButton::new(
        "No",
        CallbackPayload::Confirm {
            token,
            label,
            answer: ConfirmAnswer::Decline,
        }
        .encode()?,
    );
    Ok(Keyboard::grid(vec![affirm, decline], SELECT_COLUMNS))
}
