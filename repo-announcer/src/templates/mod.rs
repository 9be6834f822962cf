//! Announcement rendering using Handlebars.
//!
//! This module renders a repository and its latest commit into the text of
//! a post, keeping the result within the platform's length limit.

mod error;
mod renderer;
mod text;

pub use error::TemplateError;
pub use renderer::{
    create_handlebars_registry, MessageRenderer, DEFAULT_MAX_LENGTH, DEFAULT_TEMPLATE,
    DESCRIPTION_LIMIT,
};
pub use text::{
    char_weight, sanitize, truncate, weighted_length, TRUNCATION_MARKER, URL_WEIGHT,
};
