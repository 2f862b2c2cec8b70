pub mod groups;
pub mod matches;
pub mod registration;
pub mod scoring;
pub mod server;
pub mod standings;
pub mod tournaments;

#[cfg(test)]
pub(crate) mod testing;
