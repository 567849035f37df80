pub mod cli;
pub mod collection;
pub mod config;
pub mod cursor;
pub mod http;
pub mod logging;
pub mod pager;
pub mod photos;
pub mod present;
