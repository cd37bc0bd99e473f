// ABOUTME: Domain model re-exports for the server crate
// ABOUTME: Profile, WeightLog and StagnationEvent types come from caltrack-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models shared with `caltrack-core`

pub use caltrack_core::models::*;
