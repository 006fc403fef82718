pub mod env_utils;
pub mod utils;
pub mod webhook_structs;
