//! Graft Core Types
//!
//! This crate provides the foundational types used throughout Graft:
//! - Node identity (NodeId)
//! - Attribute values (the Value enum and the ordered Attributes map)
//! - Entity structures (Node, Edge)
//! - Graph error types

mod entity;
mod error;
mod id;
mod value;

pub use entity::*;
pub use error::*;
pub use id::*;
pub use value::*;
