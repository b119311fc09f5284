//! Unit tests for the dictionary context.
