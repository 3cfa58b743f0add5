pub mod completion;
pub mod entry;
pub mod navigation;
pub mod study;
pub mod tree;
