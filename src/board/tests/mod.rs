//! Unit tests for the board controller.
