pub mod logger;

pub mod report;
