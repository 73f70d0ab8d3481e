pub mod indicator;
pub mod info;
pub mod scheduler;
