//! HTML fragment loading for montra.
//!
//! Pages assemble shared chrome (header, footer) from HTML fragments
//! fetched at load time. This crate provides [`FragmentLoader`], a
//! reqwest-backed text fetcher with per-fragment failure isolation: a
//! fragment that cannot be fetched is logged and skipped, and its
//! placeholder is left untouched.
//!
//! This crate is re-exported from `montra` as `montra::net` when the
//! `networking` feature is enabled.

pub mod error;
pub mod fragment;

pub use error::{FetchError, Result};
pub use fragment::{
    Fragment, FragmentLoader, FragmentLoaderBuilder, FragmentLoaderConfig, FragmentRequest,
};
