//! Gradeflow - Evaluation Platform Backend
//!
//! This crate implements the authentication session lifecycle and
//! subscription-state reconciliation for a teacher-facing grading platform.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
