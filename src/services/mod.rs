pub mod bookshelf;
pub use bookshelf::{BookshelfResource, BookshelfService};

pub mod post_service;
pub mod post_service_impl;
pub use post_service::{PostError, PostService};
pub use post_service_impl::SeaOrmPostService;

pub mod search;
pub use search::{SearchResult, SearchService};

pub mod search_cache;
pub use search_cache::SearchCache;
