//!
//! Documentation of the config module.
//! Holds the confy configuration and the logger setup.
//!


pub mod config;
