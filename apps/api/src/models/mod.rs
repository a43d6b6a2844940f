pub mod patch;
pub mod resume;
pub mod rows;
pub mod submission;
