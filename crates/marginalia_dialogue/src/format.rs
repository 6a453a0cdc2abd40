//! Plain-text formatting of list command output.

use marginalia_storage::{AuthorRecord, ReviewRecord, StoryRecord};

const AUTHOR_SEPARATOR: &str =
    "--------------------------------------------------";

/// One author name per line.
pub fn format_authors(authors: &[AuthorRecord]) -> String {
    authors
        .iter()
        .map(|author| author.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stories grouped under their author, input already sorted by
/// `(author name, title)`.
pub fn format_stories(stories: &[StoryRecord]) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut current: Option<&str> = None;
    for story in stories {
        if current != Some(story.author_name.as_str()) {
            blocks.push(format!("{}:", story.author_name));
            current = Some(story.author_name.as_str());
        }
        if let Some(block) = blocks.last_mut() {
            block.push_str(&format!("\n    {}", story.title));
        }
    }
    blocks.join("\n\n")
}

/// Reviews grouped author then story, input already sorted by
/// `(author name, story title, text)`.
pub fn format_reviews(reviews: &[ReviewRecord]) -> String {
    let mut author_blocks: Vec<String> = Vec::new();
    let mut current_author: Option<&str> = None;
    let mut current_story: Option<&str> = None;

    for review in reviews {
        if current_author != Some(review.author_name.as_str()) {
            author_blocks.push(format!("{}:", review.author_name));
            current_author = Some(review.author_name.as_str());
            current_story = None;
        }
        if let Some(block) = author_blocks.last_mut() {
            if current_story != Some(review.story_title.as_str()) {
                block.push_str(&format!("\n  \"{}\":", review.story_title));
                current_story = Some(review.story_title.as_str());
            }
            block.push_str(&format!("\n    - [{}] {}", review.rank, review.text));
        }
    }

    author_blocks.join(&format!("\n{}\n", AUTHOR_SEPARATOR))
}
