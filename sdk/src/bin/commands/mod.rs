// Command modules for launchpad CLI

pub mod create;
pub mod init_config;
pub mod utils;
