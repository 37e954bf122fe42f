//! Per-tooth geometry: mesh partitioning and brace-anchor resolution.
//!
//! Given a scan mesh and per-vertex semantic labels, this crate can
//!
//! - cut out the submesh belonging to one tooth label
//!   ([`tooth_submesh`]),
//! - color the full mesh by label ([`apply_label_colors`]),
//! - and derive one [`BraceAnchor`] (representative outer-surface point
//!   plus normal) per tooth ([`resolve_anchors`]).
//!
//! The outer-surface selection differs by tooth position: anterior
//! teeth use a vertical normal test, posterior teeth a lateral one with
//! an extra buccal band for molars. That mapping is a static table in
//! [`families`], not control flow scattered over label lists.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod anchor;
mod colorize;
mod error;
pub mod families;
mod partition;

pub use anchor::{resolve_anchors, BraceAnchor};
pub use colorize::apply_label_colors;
pub use error::{GeometryError, GeometryResult};
pub use partition::tooth_submesh;
