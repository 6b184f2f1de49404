pub mod backends;

pub use backends::sqlite::SqliteStore;

pub mod prelude {
    pub use crate::backends::sqlite::SqliteStore;
    pub use ng_core::{ArticleStore, StoredArticle};
}
