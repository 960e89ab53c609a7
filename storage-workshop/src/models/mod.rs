//! Data models used throughout the workshop
//!
//! Compiled-artifact loading and the deployment descriptor built from it.

// Contract artifacts and deployment descriptors
pub mod artifact;
