pub(crate) mod flights;
pub(crate) mod health;
pub(crate) mod tracking;
