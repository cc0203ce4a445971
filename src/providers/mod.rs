//! Concrete search provider implementations.

pub mod duckduckgo;
pub mod github;

pub use duckduckgo::DuckDuckGoProvider;
pub use github::GitHubProvider;
