// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod fixture;
mod tree;

pub(crate) use fixture::BlockFixture;
pub(crate) use tree::{MockTree, NodeId};
