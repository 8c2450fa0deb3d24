pub mod init;
pub mod pull;
pub mod status;
