// Shared building blocks: configuration, the HTML element tree, and the data
// source that site content is fetched from.

pub mod config;
pub mod html;
pub mod site;
pub mod source;
