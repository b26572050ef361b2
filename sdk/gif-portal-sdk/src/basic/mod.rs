pub mod program;
pub mod session;
pub mod wallet;
