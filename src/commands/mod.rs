pub mod analyze;
pub mod dump;
pub mod functions;
pub mod returns;
