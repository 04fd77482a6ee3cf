#[non_exhaustive]
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown block kind: {0}")]
    UnknownBlockKind(String),
}
