//! `htmlbook_core` turns a structured document tree into HTMLBook markup.
//!
//! Each node of the tree is projected into a template-facing presentation
//! model and rendered through a [`minijinja`](https://docs.rs/minijinja)
//! template looked up by the node's name.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Document tree (built by an upstream parser, or decoded from JSON)
//!   → Converter (picks the template name: node name, or `embedded`)
//!   → Template resolver (ordered directory search, parsed once per name)
//!   → Projector (node → presentation model, outline for toc blocks)
//!   → Renderer (template + model bound to `node` → markup)
//! ```
//!
//! ## Modules
//!
//! - [`tree`]: The document tree with node kinds, block fields, lists, tables, inline spans, and the JSON decoding boundary.
//! - [`model`]: Presentation models and the projection of every node kind.
//! - [`outline`]: Table of contents generation bounded by `toclevels` and `sectnumlevels`.
//! - [`templates`]: Template resolution and the per-converter template cache.
//! - [`config`]: Configuration loading from `htmlbook.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use htmlbook_core::Converter;
//! use htmlbook_core::ConverterOptions;
//! use htmlbook_core::tree::parse_document;
//!
//! let json = std::fs::read_to_string("book.json").unwrap();
//! let document = parse_document(&json).unwrap();
//!
//! let converter = Converter::new(ConverterOptions {
//! 	template_dirs: vec!["templates".into()],
//! });
//! let html = converter.convert_document(&document, Some("embedded")).unwrap();
//! println!("{html}");
//! ```

pub use converter::*;
pub use error::*;
pub use renderer::*;

pub mod config;
mod converter;
#[allow(unused_assignments)]
mod error;
pub mod model;
pub mod outline;
mod renderer;
pub mod templates;
pub mod tree;

#[cfg(test)]
mod __fixtures;
