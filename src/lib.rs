pub mod capability;
pub mod commands;
pub mod logger;
pub mod sdk;
