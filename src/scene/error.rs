// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for scene host operations

use super::ObjectId;
use thiserror::Error;

/// Result type for scene host operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised by a scene host
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// Handle does not refer to a live object
    #[error("object {id} does not exist in the scene")]
    UnknownObject { id: ObjectId },

    /// Parenting would make an object its own ancestor
    #[error("cannot parent '{child}' to '{parent}': circular parent reference")]
    ParentCycle { child: String, parent: String },

    /// World matrix has no inverse (zero scale somewhere in the chain)
    #[error("world transform of '{name}' is not invertible")]
    SingularTransform { name: String },

    /// Object has no vertices, so it has no bounds
    #[error("object '{name}' has an empty mesh")]
    EmptyMesh { name: String },
}
