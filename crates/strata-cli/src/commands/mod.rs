//! CLI command implementations

pub(crate) mod create;
pub(crate) mod down;
pub(crate) mod history;
pub(crate) mod pending;
pub(crate) mod status;
pub(crate) mod up;
