//! Presentation adapters over the paging engine and photo models.

mod description;
mod list;

pub use description::PhotoDescriptionFormatter;
pub use list::{ErrorPrompt, ListViewModel};
