pub mod auth;
pub mod authority;
pub mod convert;
pub mod error;
pub mod interactions;
pub mod middleware;
pub mod moderation;
pub mod revalidate;
pub mod routes;
pub mod staff;
pub mod stream;

#[cfg(test)]
pub(crate) mod testing;
