//!
//! Documentation of the html_format module.
//! Builds the rendered pages out of the tera templates.
//!


use super::ODM;
use super::config;
pub mod html_format;
