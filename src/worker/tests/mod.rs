//! Tests for worker tasks, organized by worker kind

mod producer;
