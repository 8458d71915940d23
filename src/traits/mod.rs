// Copyright (c) 2026 letflow contributors
// SPDX-License-Identifier: MIT

mod transform;

pub use transform::{FutureTransform, StreamTransform};
