pub mod error;
pub mod source;
pub mod storage;
pub mod types;
pub mod verify;

pub use error::Error;
pub use source::HeadlineSource;
pub use storage::ArticleStore;
pub use types::{RawArticle, ScoredArticle, StoredArticle, Verdict};
pub use verify::Verifier;

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::error::Error;
    pub use crate::source::HeadlineSource;
    pub use crate::storage::ArticleStore;
    pub use crate::types::{RawArticle, ScoredArticle, StoredArticle, Verdict};
    pub use crate::verify::Verifier;
    pub use crate::Result;
}
