//! Favorite Handlers

pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;
