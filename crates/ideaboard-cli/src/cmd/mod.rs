pub mod add;
pub mod comment;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod session;
pub mod show;
pub mod stats;
pub mod tags;
pub mod vote;
