//! Cart Item Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod update;
pub(crate) mod update_many;
