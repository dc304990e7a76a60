// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! IDL handling: type normalization, discriminators, schema normalization
//! and the canonical document form.
//!
//! - `type_expr` - Parse any supported type shape into a `TypeExpr`
//! - `discriminator` - Namespaced sha256 discriminators
//! - `normalize` - Raw IDL document to `Schema`
//! - `document` - `Schema` back to its canonical JSON document
//! - `loader` - File loading and rendering
//! - `summary` - Human-readable schema overview

pub mod discriminator;
pub mod document;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod summary;
pub mod type_expr;

pub use discriminator::{compute, compute_for};
pub use document::to_document;
pub use error::SchemaError;
pub use loader::{load_document, load_schema, render_document};
pub use normalize::{normalize, normalize_with_address};
pub use summary::SchemaSummary;
pub use type_expr::parse_type;
