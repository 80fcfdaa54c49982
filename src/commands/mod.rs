pub mod admin;
pub mod character;
pub mod chat;
pub mod cloud;
pub mod completions;
pub mod config;
pub mod profile;
pub mod theme;
