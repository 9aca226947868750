pub mod add;
pub mod categories;
pub mod due;
pub mod grade;
pub mod stats;
pub mod study;
