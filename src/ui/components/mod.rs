pub mod concept_study;
pub mod entry_screen;
pub mod progress_bar;
pub mod syllabus_explorer;
