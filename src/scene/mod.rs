// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene host contract and an in-memory implementation

mod error;
mod host;
mod memory;
mod object;

pub use error::{SceneError, SceneResult};
pub use host::SceneHost;
pub use memory::InMemoryScene;
pub use object::{MeshObject, Modifier, ObjectId};
