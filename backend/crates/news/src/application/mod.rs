//! Application Layer
//!
//! Services orchestrating the news domain. Each validates its raw input into
//! value objects before touching a repository.

pub mod articles;
pub mod authors;
pub mod bookmarks;

pub use articles::{ArticleService, CreateArticleInput, UpdateArticleInput};
pub use authors::{AuthorService, CreateAuthorInput, UpdateAuthorInput};
pub use bookmarks::BookmarkService;
