pub mod draft;
pub mod idea;
pub mod normalize;

pub use draft::{IdeaDraft, parse_tag_list};
pub use idea::{Category, Comment, IMPORTED_AUTHOR, Idea, ParseEnumError, Status, UNASSIGNED};
