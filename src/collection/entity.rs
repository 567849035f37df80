//! Wire shape of a paginated collection response.
//!
//! ```json
//! {
//!   "collection": {
//!     "items": [ { "data": [ {...} ], "links": [ {"href": "...", "rel": "preview"} ], "href": "..." } ],
//!     "links": [ {"href": "...", "rel": "next"} ]
//!   }
//! }
//! ```

use serde::Deserialize;

use crate::http::{EscapedUrl, LinkUrl};

/// Relation of a link to the resource that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRelation {
    Preview,
    Next,
    Prev,
    Captions,
    /// Any relation this client does not act on.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link<U> {
    pub href: U,
    pub rel: LinkRelation,
}

/// One entry of a page: its records, sub-links and self link.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionItem<E> {
    pub data: Vec<E>,
    #[serde(default = "Vec::new")]
    pub links: Vec<Link<EscapedUrl>>,
    pub href: EscapedUrl,
}

impl<E> CollectionItem<E> {
    /// First sub-link with the given relation.
    pub fn link(&self, rel: LinkRelation) -> Option<&EscapedUrl> {
        self.links.iter().find(|l| l.rel == rel).map(|l| &l.href)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionEntity<E> {
    pub items: Vec<CollectionItem<E>>,
    #[serde(default = "Vec::new")]
    pub links: Vec<Link<LinkUrl>>,
}

impl<E> CollectionEntity<E> {
    /// Link to the following page, if any. The first `next` relation wins,
    /// regardless of where it appears among the links.
    pub fn next_link(&self) -> Option<&Link<LinkUrl>> {
        self.links.iter().find(|l| l.rel == LinkRelation::Next)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionResponse<E> {
    pub collection: CollectionEntity<E>,
}
