pub mod dynamodb;
pub mod history;
pub mod localfs;
pub mod memory;
pub mod object;
pub mod s3;
