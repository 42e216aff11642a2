pub mod draft;
pub mod fields;
pub mod init;
pub mod issues;
pub mod resolve;
