//! Behavior tests for the session layer.
//!
//! Everything here drives the real client pipeline over the scripted
//! mock transport; only the wire is faked.

mod helpers;

mod error_test;
