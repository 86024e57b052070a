pub(crate) mod analyze;
pub(crate) mod health;
pub(crate) mod news;
