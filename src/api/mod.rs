pub mod auth;
pub mod client;
pub mod product;
pub mod project;
pub mod resource;

#[cfg(test)]
mod test;

pub use client::{ApiClient, ApiError};
pub use resource::RemoteClient;
