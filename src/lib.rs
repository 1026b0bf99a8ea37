//! Structured data (schema.org JSON-LD) for the Northline Financial website.
//!
//! [`schema`] holds the generators; [`site`] decides which of them each page
//! calls, from the [`config`] and the [`content`] catalog.

pub mod config;
pub mod content;
mod diagnostic;
pub mod render;
pub mod schema;
pub mod serve;
pub mod site;
