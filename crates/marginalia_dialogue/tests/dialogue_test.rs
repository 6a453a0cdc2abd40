//! End-to-end workflow tests against an in-memory database.

use marginalia_core::{
    AuthorId, CallbackPayload, ConfirmAnswer, CorrelationToken, Interaction, Rank, Render, StoryId,
    UserId, WorkflowLabel,
};
use marginalia_dialogue::Dialogue;
use marginalia_storage::StorageEngine;

const USER: i64 = 7_155_816;

fn dialogue() -> Dialogue {
    Dialogue::new(StorageEngine::open_in_memory().unwrap())
}

fn command(bot: &Dialogue, user: i64, token: i64, name: &str, args: &[&str]) -> Render {
    let args = args.iter().map(|s| s.to_string()).collect();
    bot.handle(&Interaction::command(
        UserId::from(user),
        CorrelationToken::from(token),
        name,
        args,
    ))
    .unwrap()
}

fn click(bot: &Dialogue, user: i64, payload: &CallbackPayload) -> Render {
    bot.handle(&Interaction::callback(
        UserId::from(user),
        CorrelationToken::from(0),
        payload.encode().unwrap(),
    ))
    .unwrap()
}

fn confirm(token: i64, label: WorkflowLabel, answer: ConfirmAnswer) -> CallbackPayload {
    CallbackPayload::Confirm {
        token: CorrelationToken::from(token),
        label,
        answer,
    }
}

fn select_author(token: i64, author: AuthorId) -> CallbackPayload {
    CallbackPayload::SelectAuthor {
        token: CorrelationToken::from(token),
        author,
    }
}

fn select_story(token: i64, story: StoryId) -> CallbackPayload {
    CallbackPayload::SelectStory {
        token: CorrelationToken::from(token),
        story,
    }
}

fn add_author(bot: &Dialogue, user: i64, token: i64, name: &str) -> AuthorId {
    command(bot, user, token, "add_author", &[name]);
    let render = click(
        bot,
        user,
        &confirm(token, WorkflowLabel::AddAuthor, ConfirmAnswer::Affirm),
    );
    assert!(render.text.ends_with("Status: added"));
    bot.storage()
        .find_author_id(UserId::from(user), name)
        .unwrap()
        .unwrap()
}

fn add_story(bot: &Dialogue, user: i64, token: i64, title: &str, author: AuthorId) -> StoryId {
    command(bot, user, token, "add_story", &[title]);
    click(bot, user, &select_author(token, author));
    let render = click(
        bot,
        user,
        &confirm(token, WorkflowLabel::AddStory, ConfirmAnswer::Affirm),
    );
    assert!(render.text.ends_with("Status: added"));
    bot.storage()
        .find_story_id(UserId::from(user), author, title)
        .unwrap()
        .unwrap()
}

#[test]
fn start_greets_and_unknown_command_shows_help() {
    let bot = dialogue();
    let greeting = command(&bot, USER, 1, "start", &[]);
    assert!(greeting.text.contains("reading diary"));
    assert!(greeting.keyboard.is_none());

    let help = command(&bot, USER, 2, "frobnicate", &[]);
    assert!(help.text.contains("/add_author"));
    assert!(help.text.contains("/remove_review"));
}

#[test]
fn add_author_asks_then_commits_on_affirm() {
    let bot = dialogue();
    let render = command(&bot, USER, 1, "add_author", &["Gogol"]);
    assert_eq!(render.text, "Add author \"Gogol\"?");
    assert_eq!(render.keyboard.unwrap().buttons().count(), 2);

    let done = click(
        &bot,
        USER,
        &confirm(1, WorkflowLabel::AddAuthor, ConfirmAnswer::Affirm),
    );
    assert_eq!(done.text, "Add author \"Gogol\"?\nStatus: added");
    assert!(
        bot.storage()
            .find_author_id(UserId::from(USER), "Gogol")
            .unwrap()
            .is_some()
    );
}

#[test]
fn add_author_without_args_shows_usage_and_opens_no_session() {
    let bot = dialogue();
    let render = command(&bot, USER, 1, "add_author", &[]);
    assert_eq!(render.text, "Add an author: /add_author AUTHOR_NAME");
    assert!(render.keyboard.is_none());

    let stale = click(
        &bot,
        USER,
        &confirm(1, WorkflowLabel::AddAuthor, ConfirmAnswer::Affirm),
    );
    assert!(stale.text.contains("no longer active"));
}

#[test]
fn add_author_duplicate_short_circuits() {
    let bot = dialogue();
    add_author(&bot, USER, 1, "Gogol");
    let render = command(&bot, USER, 2, "add_author", &["Gogol"]);
    assert_eq!(render.text, "This author is already in your diary.");
    assert!(render.keyboard.is_none());
}

#[test]
fn decline_commits_nothing() {
    let bot = dialogue();
    command(&bot, USER, 1, "add_author", &["Gogol"]);
    let render = click(
        &bot,
        USER,
        &confirm(1, WorkflowLabel::AddAuthor, ConfirmAnswer::Decline),
    );
    assert!(render.text.ends_with("Status: cancelled"));
    assert!(
        bot.storage()
            .find_author_id(UserId::from(USER), "Gogol")
            .unwrap()
            .is_none()
    );
}

#[test]
fn add_story_walks_author_selection_then_confirm() {
    let bot = dialogue();
    let author = add_author(&bot, USER, 1, "Babel");

    let render = command(&bot, USER, 2, "add_story", &["Red", "Cavalry"]);
    assert_eq!(render.text, "Who wrote `Red Cavalry`?");
    assert!(!render.keyboard.unwrap().is_empty());

    let render = click(&bot, USER, &select_author(2, author));
    assert_eq!(render.text, "Add story `Red Cavalry` by `Babel`?");

    let done = click(
        &bot,
        USER,
        &confirm(2, WorkflowLabel::AddStory, ConfirmAnswer::Affirm),
    );
    assert!(done.text.ends_with("Status: added"));
    assert!(
        bot.storage()
            .find_story_id(UserId::from(USER), author, "Red Cavalry")
            .unwrap()
            .is_some()
    );
}

#[test]
fn add_review_walks_all_four_steps() {
    let bot = dialogue();
    let author = add_author(&bot, USER, 1, "Babel");
    let story = add_story(&bot, USER, 2, "Red Cavalry", author);

    command(&bot, USER, 3, "add_review", &["Brutal", "and", "brilliant"]);
    click(&bot, USER, &select_author(3, author));
    let render = click(&bot, USER, &select_story(3, story));
    assert_eq!(render.text, "Rate `Red Cavalry` by `Babel`");
    // six ranks plus cancel
    assert_eq!(render.keyboard.unwrap().buttons().count(), 7);

    let render = click(
        &bot,
        USER,
        &CallbackPayload::SelectRank {
            token: CorrelationToken::from(3),
            rank: 5,
        },
    );
    assert_eq!(
        render.text,
        "Add a review of `Red Cavalry` by `Babel` with rank `5`?"
    );

    let done = click(
        &bot,
        USER,
        &confirm(3, WorkflowLabel::AddReview, ConfirmAnswer::Affirm),
    );
    assert!(done.text.ends_with("Status: added"));

    let reviews = bot
        .storage()
        .list_reviews(UserId::from(USER), None)
        .unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].text, "Brutal and brilliant");
    assert_eq!(reviews[0].rank, Rank::new(5).unwrap());
}

#[test]
fn confirm_with_wrong_label_ends_workflow_without_writing() {
    let bot = dialogue();
    let author = add_author(&bot, USER, 1, "Babel");

    command(&bot, USER, 2, "add_story", &["Red Cavalry"]);
    click(&bot, USER, &select_author(2, author));

    // A confirm click from a different workflow's keyboard.
    let stale = click(
        &bot,
        USER,
        &confirm(2, WorkflowLabel::AddReview, ConfirmAnswer::Affirm),
    );
    assert!(stale.text.contains("no longer active"));
    assert!(
        bot.storage()
            .find_story_id(UserId::from(USER), author, "Red Cavalry")
            .unwrap()
            .is_none()
    );

    // The mismatch ended the session; the right label is now stale too.
    let stale = click(
        &bot,
        USER,
        &confirm(2, WorkflowLabel::AddStory, ConfirmAnswer::Affirm),
    );
    assert!(stale.text.contains("no longer active"));
}

#[test]
fn unknown_token_is_rejected_neutrally() {
    let bot = dialogue();
    let stale = click(
        &bot,
        USER,
        &confirm(404, WorkflowLabel::AddAuthor, ConfirmAnswer::Affirm),
    );
    assert!(stale.text.contains("no longer active"));
}

#[test]
fn foreign_click_is_rejected_but_owner_session_survives() {
    let bot = dialogue();
    let intruder = USER + 1;
    command(&bot, USER, 1, "add_author", &["Gogol"]);

    let stale = click(
        &bot,
        intruder,
        &confirm(1, WorkflowLabel::AddAuthor, ConfirmAnswer::Affirm),
    );
    assert!(stale.text.contains("no longer active"));
    assert!(
        bot.storage()
            .find_author_id(UserId::from(USER), "Gogol")
            .unwrap()
            .is_none()
    );

    let done = click(
        &bot,
        USER,
        &confirm(1, WorkflowLabel::AddAuthor, ConfirmAnswer::Affirm),
    );
    assert!(done.text.ends_with("Status: added"));
}

#[test]
fn cancel_command_abandons_open_workflow() {
    let bot = dialogue();
    command(&bot, USER, 1, "add_author", &["Gogol"]);

    let render = command(&bot, USER, 2, "cancel", &[]);
    assert_eq!(render.text, "Alright, maybe another time.");

    let stale = click(
        &bot,
        USER,
        &confirm(1, WorkflowLabel::AddAuthor, ConfirmAnswer::Affirm),
    );
    assert!(stale.text.contains("no longer active"));
    assert!(
        bot.storage()
            .find_author_id(UserId::from(USER), "Gogol")
            .unwrap()
            .is_none()
    );
}

#[test]
fn cancel_button_ends_workflow_mid_selection() {
    let bot = dialogue();
    let author = add_author(&bot, USER, 1, "Babel");
    add_story(&bot, USER, 2, "Red Cavalry", author);

    command(&bot, USER, 3, "add_review", &["Fine"]);
    click(&bot, USER, &select_author(3, author));

    let render = click(
        &bot,
        USER,
        &CallbackPayload::Cancel {
            token: CorrelationToken::from(3),
        },
    );
    assert!(render.text.ends_with("Status: cancelled"));

    let stale = click(&bot, USER, &select_author(3, author));
    assert!(stale.text.contains("no longer active"));
}

#[test]
fn out_of_range_rank_ends_workflow() {
    let bot = dialogue();
    let author = add_author(&bot, USER, 1, "Babel");
    let story = add_story(&bot, USER, 2, "Red Cavalry", author);

    command(&bot, USER, 3, "add_review", &["Fine"]);
    click(&bot, USER, &select_author(3, author));
    click(&bot, USER, &select_story(3, story));

    let render = click(
        &bot,
        USER,
        &CallbackPayload::SelectRank {
            token: CorrelationToken::from(3),
            rank: 9,
        },
    );
    assert!(render.text.contains("between 0 and 5"));

    let stale = click(
        &bot,
        USER,
        &CallbackPayload::SelectRank {
            token: CorrelationToken::from(3),
            rank: 5,
        },
    );
    assert!(stale.text.contains("no longer active"));
    assert!(
        bot.storage()
            .list_reviews(UserId::from(USER), None)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn duplicate_review_is_rejected_at_commit() {
    let bot = dialogue();
    let author = add_author(&bot, USER, 1, "Babel");
    let story = add_story(&bot, USER, 2, "Red Cavalry", author);
    bot.storage()
        .create_review(UserId::from(USER), story, "First", Rank::new(4).unwrap())
        .unwrap();

    command(&bot, USER, 3, "add_review", &["Second"]);
    click(&bot, USER, &select_author(3, author));
    click(&bot, USER, &select_story(3, story));
    click(
        &bot,
        USER,
        &CallbackPayload::SelectRank {
            token: CorrelationToken::from(3),
            rank: 2,
        },
    );
    let render = click(
        &bot,
        USER,
        &confirm(3, WorkflowLabel::AddReview, ConfirmAnswer::Affirm),
    );
    assert!(render.text.contains("already have a review"));
    assert_eq!(
        bot.storage()
            .list_reviews(UserId::from(USER), None)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn remove_author_cascades_through_confirm() {
    let bot = dialogue();
    let user = UserId::from(USER);
    let author = add_author(&bot, USER, 1, "Стругацкие");
    let story = add_story(&bot, USER, 2, "Пикник на обочине", author);
    bot.storage()
        .create_review(user, story, "Отлично", Rank::new(5).unwrap())
        .unwrap();

    let render = command(&bot, USER, 3, "remove_author", &[]);
    assert_eq!(render.text, "Pick an author");
    click(&bot, USER, &select_author(3, author));
    let done = click(
        &bot,
        USER,
        &confirm(3, WorkflowLabel::RemoveAuthor, ConfirmAnswer::Affirm),
    );
    assert!(done.text.ends_with("Status: removed"));

    assert!(bot.storage().list_authors(user).unwrap().is_empty());
    assert!(bot.storage().list_stories(user, None).unwrap().is_empty());
    assert!(bot.storage().list_reviews(user, None).unwrap().is_empty());
}

#[test]
fn remove_review_keeps_the_story() {
    let bot = dialogue();
    let user = UserId::from(USER);
    let author = add_author(&bot, USER, 1, "Babel");
    let story = add_story(&bot, USER, 2, "Red Cavalry", author);
    let review = bot
        .storage()
        .create_review(user, story, "Brutal and brilliant", Rank::new(5).unwrap())
        .unwrap();

    command(&bot, USER, 3, "remove_review", &[]);
    click(&bot, USER, &select_author(3, author));
    let render = click(&bot, USER, &select_story(3, story));
    assert_eq!(render.text, "Pick your review of `Red Cavalry` by `Babel`");
    // one preview button plus cancel
    assert_eq!(render.keyboard.unwrap().buttons().count(), 2);

    click(
        &bot,
        USER,
        &CallbackPayload::SelectReview {
            token: CorrelationToken::from(3),
            review,
        },
    );
    let done = click(
        &bot,
        USER,
        &confirm(3, WorkflowLabel::RemoveReview, ConfirmAnswer::Affirm),
    );
    assert!(done.text.ends_with("Status: removed"));
    assert!(bot.storage().list_reviews(user, None).unwrap().is_empty());
    assert_eq!(bot.storage().list_stories(user, None).unwrap().len(), 1);
}

#[test]
fn empty_author_selection_still_renders_a_keyboard() {
    let bot = dialogue();
    for (token, name) in [(1, "remove_author"), (2, "remove_story"), (3, "remove_review")] {
        let render = command(&bot, USER, token, name, &[]);
        assert_eq!(render.text, "Pick an author");
        assert!(render.keyboard.unwrap().is_empty());
    }
}

#[test]
fn add_story_with_no_authors_renders_empty_selection() {
    let bot = dialogue();
    let render = command(&bot, USER, 1, "add_story", &["Red Cavalry"]);
    assert_eq!(render.text, "Who wrote `Red Cavalry`?");
    assert!(render.keyboard.unwrap().is_empty());
}

#[test]
fn empty_story_selection_still_renders_a_keyboard() {
    let bot = dialogue();
    let author = add_author(&bot, USER, 1, "Babel");

    command(&bot, USER, 2, "remove_story", &[]);
    let render = click(&bot, USER, &select_author(2, author));
    assert_eq!(render.text, "Pick a story by `Babel`");
    assert!(render.keyboard.unwrap().is_empty());
}

#[test]
fn selection_keyboard_payloads_round_trip() {
    let bot = dialogue();
    let author = add_author(&bot, USER, 1, "Babel");

    let render = command(&bot, USER, 2, "remove_author", &[]);
    let keyboard = render.keyboard.unwrap();
    let button = keyboard.buttons().next().unwrap();
    assert_eq!(button.label, "Babel");
    assert_eq!(
        CallbackPayload::decode(&button.payload).unwrap(),
        CallbackPayload::SelectAuthor {
            token: CorrelationToken::from(2),
            author,
        }
    );
}

#[test]
fn list_commands_render_grouped_text() {
    let bot = dialogue();
    let babel = add_author(&bot, USER, 1, "Babel");
    let gogol = add_author(&bot, USER, 2, "Gogol");
    add_story(&bot, USER, 3, "Red Cavalry", babel);
    add_story(&bot, USER, 4, "The Nose", gogol);

    let authors = command(&bot, USER, 5, "list_authors", &[]);
    assert_eq!(authors.text, "Your authors:\n\nBabel\nGogol");

    let stories = command(&bot, USER, 6, "list_stories", &[]);
    assert_eq!(
        stories.text,
        "Your stories:\n\nBabel:\n    Red Cavalry\n\nGogol:\n    The Nose"
    );

    let reviews = command(&bot, USER, 7, "list_reviews", &[]);
    assert!(reviews.text.contains("no reviews yet"));
}

#[test]
fn workflows_are_scoped_per_user() {
    let bot = dialogue();
    let other = USER + 1;
    add_author(&bot, USER, 1, "Babel");

    let render = command(&bot, other, 2, "list_authors", &[]);
    assert!(render.text.contains("no authors yet"));

    // Both users can run the same workflow concurrently on their own tokens.
    command(&bot, USER, 3, "add_author", &["Gogol"]);
    command(&bot, other, 4, "add_author", &["Gogol"]);
    click(
        &bot,
        other,
        &confirm(4, WorkflowLabel::AddAuthor, ConfirmAnswer::Affirm),
    );
    click(
        &bot,
        USER,
        &confirm(3, WorkflowLabel::AddAuthor, ConfirmAnswer::Affirm),
    );
    assert_eq!(
        bot.storage()
            .list_authors(UserId::from(USER))
            .unwrap()
            .len(),
        2
    );
    assert_eq!(
        bot.storage()
            .list_authors(UserId::from(other))
            .unwrap()
            .len(),
        1
    );
}
