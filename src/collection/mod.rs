//! Collection repository: a [`Cursor`](crate::cursor::Cursor) backed by a
//! REST-style paginated search endpoint.

mod entity;
mod repository;

pub use entity::{CollectionEntity, CollectionItem, CollectionResponse, Link, LinkRelation};
pub use repository::CollectionRepository;
