//! Domains module containing the server-side business logic.
//!
//! Each subdomain represents a specific area of functionality within the
//! tool servers. Only tools are served; the servers advertise no resources
//! or prompts.

pub mod tools;
