//! sinistro-admin: REST backend for insurance-claim procedure checklists
//!
//! Clients carry an ordered checklist of procedures; providers carry two
//! checklists (primary and additional) partitioned by claim type. A small
//! reference catalog lists procedures per claim type.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod richtext;
