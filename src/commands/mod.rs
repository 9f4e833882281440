pub mod check;
pub mod dispatch;
pub mod init;
pub mod variant;
