//! Cross-module test suite for the block editor
//!
//! Unit tests live next to the code they cover; this module holds the
//! suites that go through several components at once.

mod codec_tests;
mod roundtrip_tests;
mod scenario_tests;
