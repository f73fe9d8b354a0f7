//! Test modules for the marketplace
//!
//! This module organizes the test suites for the marketplace component.
//! Tests are organized by functional area for better maintainability.

mod concurrent;
