//! Tests for the storage engine: cascades, validation, and user isolation.

use marginalia_core::{Rank, UserId};
use marginalia_storage::StorageEngine;

fn engine() -> StorageEngine {
    StorageEngine::open_in_memory().expect("in-memory storage")
}

#[test]
fn register_user_is_idempotent() {
    let storage = engine();
    let user = UserId::from(1);

    assert!(storage.register_user_if_absent(user).unwrap());
    assert!(!storage.register_user_if_absent(user).unwrap());
}

#[test]
fn author_delete_cascades_to_stories_and_reviews() {
    let storage = engine();
    let user = UserId::from(1);
    storage.register_user_if_absent(user).unwrap();

    let author = storage.create_author(user, "Chekhov").unwrap();
    let story = storage.create_story(user, "The Lady with the Dog", author).unwrap();
    storage
        .create_review(user, story, "Quiet and devastating", Rank::new(5).unwrap())
        .unwrap();

    storage.delete_author(user, author).unwrap();

    assert!(storage.list_stories(user, None).unwrap().is_empty());
    assert!(storage.list_reviews(user, None).unwrap().is_empty());
    assert!(storage.get_author(user, author).unwrap().is_none());
}

#[test]
fn story_delete_cascades_to_reviews() {
    let storage = engine();
    let user = UserId::from(1);
    storage.register_user_if_absent(user).unwrap();

    let author = storage.create_author(user, "Gogol").unwrap();
    let story = storage.create_story(user, "The Nose", author).unwrap();
    let kept = storage.create_story(user, "The Overcoat", author).unwrap();
    storage
        .create_review(user, story, "Absurd", Rank::new(4).unwrap())
        .unwrap();
    storage
        .create_review(user, kept, "A classic", Rank::new(5).unwrap())
        .unwrap();

    storage.delete_story(user, story).unwrap();

    let reviews = storage.list_reviews(user, None).unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].story_title, "The Overcoat");
    let stories = storage.list_stories(user, None).unwrap();
    assert_eq!(stories.len(), 1);
}

#[test]
fn rank_is_validated_before_any_write() {
    let storage = engine();
    let user = UserId::from(1);
    storage.register_user_if_absent(user).unwrap();
    let author = storage.create_author(user, "Tolstoy").unwrap();

    // Rank construction is the write-side guard.
    assert!(Rank::new(-1).is_err());
    assert!(Rank::new(6).is_err());
    for value in 0..=5 {
        let title = format!("story {value}");
        let story = storage.create_story(user, &title, author).unwrap();
        let rank = Rank::new(value).unwrap();
        storage.create_review(user, story, "text", rank).unwrap();
    }
    assert_eq!(storage.list_reviews(user, None).unwrap().len(), 6);
}

#[test]
fn duplicate_review_per_story_is_rejected() {
    let storage = engine();
    let user = UserId::from(1);
    storage.register_user_if_absent(user).unwrap();
    let author = storage.create_author(user, "Bulgakov").unwrap();
    let story = storage.create_story(user, "Morphine", author).unwrap();

    storage
        .create_review(user, story, "Haunting", Rank::new(4).unwrap())
        .unwrap();
    let err = storage
        .create_review(user, story, "Second thoughts", Rank::new(2).unwrap())
        .unwrap_err();
    assert!(err.validation().is_some());
    assert_eq!(storage.list_story_reviews(user, story).unwrap().len(), 1);
}

#[test]
fn empty_names_are_rejected() {
    let storage = engine();
    let user = UserId::from(1);
    storage.register_user_if_absent(user).unwrap();

    assert!(storage.create_author(user, "  ").is_err());
    let author = storage.create_author(user, "Platonov").unwrap();
    assert!(storage.create_story(user, "", author).is_err());
    let story = storage.create_story(user, "The Foundation Pit", author).unwrap();
    assert!(
        storage
            .create_review(user, story, " ", Rank::new(3).unwrap())
            .is_err()
    );
}

#[test]
fn cross_user_rows_are_isolated() {
    let storage = engine();
    let alice = UserId::from(1);
    let bob = UserId::from(2);
    storage.register_user_if_absent(alice).unwrap();
    storage.register_user_if_absent(bob).unwrap();

    let alice_author = storage.create_author(alice, "Nabokov").unwrap();
    let bob_author = storage.create_author(bob, "Nabokov").unwrap();
    let bob_story = storage.create_story(bob, "The Defense", bob_author).unwrap();
    storage
        .create_review(bob, bob_story, "Chess fever", Rank::new(5).unwrap())
        .unwrap();

    // Deleting Alice's identically-named author must not touch Bob's rows.
    storage.delete_author(alice, alice_author).unwrap();

    assert!(storage.list_authors(alice).unwrap().is_empty());
    assert_eq!(storage.list_authors(bob).unwrap().len(), 1);
    assert_eq!(storage.list_stories(bob, None).unwrap().len(), 1);
    assert_eq!(storage.list_reviews(bob, None).unwrap().len(), 1);

    // Scoped deletes with the wrong user are no-ops.
    storage.delete_story(alice, bob_story).unwrap();
    assert_eq!(storage.list_stories(bob, None).unwrap().len(), 1);
}

#[test]
fn duplicate_author_lookup_returns_first_by_insertion_order() {
    let storage = engine();
    let user = UserId::from(1);
    storage.register_user_if_absent(user).unwrap();

    // Storage does not enforce (user, name) uniqueness; duplicate
    // detection belongs to the dialogue layer.
    let first = storage.create_author(user, "Leskov").unwrap();
    let second = storage.create_author(user, "Leskov").unwrap();
    assert_ne!(first, second);

    let found = storage.find_author_id(user, "Leskov").unwrap();
    assert_eq!(found, Some(first));
}

#[test]
fn lists_are_sorted_and_scoped() {
    let storage = engine();
    let user = UserId::from(1);
    storage.register_user_if_absent(user).unwrap();

    let b = storage.create_author(user, "Babel").unwrap();
    let a = storage.create_author(user, "Akhmatova").unwrap();
    storage.create_story(user, "Red Cavalry", b).unwrap();
    storage.create_story(user, "Odessa Stories", b).unwrap();
    storage.create_story(user, "Poem Without a Hero", a).unwrap();

    let all = storage.list_stories(user, None).unwrap();
    let titles: Vec<&str> = all.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Poem Without a Hero", "Odessa Stories", "Red Cavalry"]
    );

    let scoped = storage.list_stories(user, Some(b)).unwrap();
    let titles: Vec<&str> = scoped.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Odessa Stories", "Red Cavalry"]);

    let by_name = storage.list_authors_by_name(user).unwrap();
    assert_eq!(by_name[0].name, "Akhmatova");
    let by_id = storage.list_authors(user).unwrap();
    assert_eq!(by_id[0].name, "Babel");
}

#[test]
fn full_scenario_with_cyrillic_data() {
    let storage = engine();
    let user = UserId::from(7_155_816);
    storage.register_user_if_absent(user).unwrap();

    let author = storage.create_author(user, "Стругацкие").unwrap();
    let story = storage
        .create_story(user, "Пикник на обочине", author)
        .unwrap();
    storage
        .create_review(user, story, "Отлично", Rank::new(5).unwrap())
        .unwrap();

    let reviews = storage.list_reviews(user, None).unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].author_name, "Стругацкие");
    assert_eq!(reviews[0].story_title, "Пикник на обочине");
    assert_eq!(reviews[0].rank.get(), 5);

    storage.delete_author(user, author).unwrap();
    assert!(storage.list_reviews(user, None).unwrap().is_empty());
    assert!(storage.list_stories(user, None).unwrap().is_empty());
}

#[test]
fn find_story_id_matches_exactly() {
    let storage = engine();
    let user = UserId::from(1);
    storage.register_user_if_absent(user).unwrap();

    let author = storage.create_author(user, "Zamyatin").unwrap();
    let story = storage.create_story(user, "We", author).unwrap();

    assert_eq!(storage.find_story_id(user, author, "We").unwrap(), Some(story));
    assert_eq!(storage.find_story_id(user, author, "Us").unwrap(), None);
}
