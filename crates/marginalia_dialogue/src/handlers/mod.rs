//! Workflow entry points and step handlers, one module per entity.

mod author;
mod review;
mod story;
