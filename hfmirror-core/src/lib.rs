pub mod cli;
pub mod codec;
pub mod conf;
pub mod ctx;
pub mod gate;
pub mod logging;
pub mod pages;
pub mod proxy;
pub mod redirect;
pub mod route;
pub mod server;
pub mod upstream;
