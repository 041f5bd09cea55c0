//! Unit test binary: cross-module properties of the core.

mod renderer_test;
