pub mod application;
pub mod dashboard;
pub mod document;
pub mod notification;
pub mod profile;
pub mod program;
pub mod review;
pub mod university;
