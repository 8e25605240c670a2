pub mod icon;
pub mod launch;
pub mod runtime;
