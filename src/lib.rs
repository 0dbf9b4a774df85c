pub mod core;
pub mod gui;
pub mod import;
pub mod persistence;
pub mod pinyin;
pub mod review;
pub mod storage;
