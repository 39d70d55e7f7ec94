//! Word-timing and word-rendering engine for RSVP reading.
//!
//! Everything here is `no_std` + `alloc` and driven by explicit millisecond
//! timestamps, so the same state machine runs under a terminal host, a test
//! harness or an embedded board loop.

#![no_std]

extern crate alloc;

pub mod app;
pub mod clock;
pub mod content;
pub mod input;
pub mod render;
pub mod session;
pub mod settings;
pub mod text_policy;
pub mod word_info;
