mod custom;
mod kind;
pub(crate) mod list;
pub(crate) mod marker;

pub use custom::{class_slug, custom_title};
pub use kind::BlockKind;
