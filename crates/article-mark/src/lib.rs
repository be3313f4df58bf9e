#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod export;
pub mod model;
pub mod render;
pub mod service;
pub mod session;

pub mod error {
    pub use anyhow::{Error, Result};
}
