pub mod add;
pub mod cancel;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod folder;
pub mod navigate;
pub mod show;
