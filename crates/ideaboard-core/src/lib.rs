//! ideaboard-core library.
//!
//! A board is an ordered [`store::IdeaStore`] plus a [`view::ViewState`]
//! describing what to show. Listings come from [`pipeline::render`]: sort,
//! filter, then optionally group by due month. The view state round-trips
//! through a query string ([`view::codec`]) so any listing can be shared
//! as a link.
//!
//! # Conventions
//!
//! - **Errors**: user-initiated operations return [`error::Result`];
//!   malformed external input degrades to defaults and is logged.
//! - **Logging**: `tracing` macros (`debug!`, `warn!`).

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod filter;
pub mod markup;
pub mod model;
pub mod pipeline;
pub mod session;
pub mod sort;
pub mod stats;
pub mod store;
pub mod transfer;
pub mod view;

pub use error::{IdeaError, Result};
pub use model::{Category, Comment, Idea, IdeaDraft, Status};
pub use pipeline::{Board, DisplayList, Rendered, TimelineSection, render};
pub use session::Identity;
pub use store::IdeaStore;
pub use view::{Choice, SortKey, ViewState};
