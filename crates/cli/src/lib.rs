//! End-to-end UI test suite for the nose iOS app.
//!
//! Scenarios drive the app through page objects over one shared remote
//! session ([`fixture::TestRun`]) and pass values between each other through
//! a JSON [`handoff::HandoffStore`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fixture;
pub mod flows;
pub mod handoff;
pub mod logging;
pub mod pages;
pub mod runner;
pub mod scenarios;
pub mod styles;
