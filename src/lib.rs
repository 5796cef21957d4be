pub mod logger;
pub mod steganalysis;
pub mod server;
