//! Topovis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the topovis crates:
//!
//! - **Identifiers**: Cheap-to-clone node identifiers ([`identifier::NodeId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: SVG drawing primitives and z-ordered layers ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
