//! Diesel table definitions for the diary schema.

diesel::table! {
    users (id) {
        id -> BigInt,
    }
}

diesel::table! {
    authors (id) {
        id -> BigInt,
        user_id -> BigInt,
        name -> Text,
    }
}

diesel::table! {
    stories (id) {
        id -> BigInt,
        user_id -> BigInt,
        title -> Text,
        author_id -> BigInt,
    }
}

diesel::table! {
    reviews (id) {
        id -> BigInt,
        user_id -> BigInt,
        story_id -> BigInt,
        text -> Text,
        rank -> Integer,
    }
}

diesel::joinable!(stories -> authors (author_id));
diesel::joinable!(reviews -> stories (story_id));

diesel::allow_tables_to_appear_in_same_query!(users, authors, stories, reviews);
