pub mod doctor;
pub mod info;
pub mod search;
