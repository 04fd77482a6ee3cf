//! The `md2lab` command.
//!
//! [`convert::run`] resolves the command line into a [`convert::Job`] and
//! [`convert::execute`] drives one rendering pass per variant.

pub mod convert;
pub mod error;
