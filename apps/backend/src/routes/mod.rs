pub mod cards;
pub mod grade;
pub mod study;
