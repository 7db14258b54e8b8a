//! Data models for Librarium entities

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod language;
pub mod user;
