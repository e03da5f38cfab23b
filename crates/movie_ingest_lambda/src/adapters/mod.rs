pub mod dynamodb;
pub mod movie_table;
pub mod object_store;
pub mod s3;
