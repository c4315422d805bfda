// Copyright 2026 Job Scout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Job Scout runtime: acquisition strategies, the headless renderer seam,
//! and the REST API around the `job-scout` core.
//!
//! This library crate exposes the modules for integration testing.

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod renderer;
pub mod rest;
pub mod service;
