// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Value types for both directions of the wire
//!
//! This module provides:
//! - Outbound scalars and the Cypher literal rendering used in query text
//! - Builder-side nodes and edges that serialize into `CREATE` literals
//! - Decoded result values (node, edge and path records)

pub mod edge;
pub mod node;
pub mod scalar;
pub mod value;

pub use edge::Edge;
pub use node::Node;
pub use scalar::{quote_string, Scalar};
pub use value::{EdgeRecord, NodeRecord, PathElement, PathRecord, Value};
