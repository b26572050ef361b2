pub mod happy_path;
pub mod session_flow;
