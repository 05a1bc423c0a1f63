pub mod analyze;
pub mod pixels;
