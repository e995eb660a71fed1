pub mod file_bug;
