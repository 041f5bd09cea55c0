//! Integration test binary: whole-game flows from level data to race end.

mod level_files_test;
