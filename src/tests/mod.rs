//! Cross-module tests for the inference engines.
