//! Data models for the library catalog

pub mod author;
pub mod author_book;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorDetail, AuthorQuery};
pub use author_book::AuthorBook;
pub use book::{Book, BookDetail, BookQuery};
