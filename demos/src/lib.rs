// Copyright 2025 the Icezone Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demos for the icezone workspace; see the `examples/` directory.
