//! Subcommand implementations.
//!
//! Each command drives the [`Storefront`](istore_storefront::Storefront)
//! facade and writes human-readable (or JSON) output to the given writer.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod theme;

use std::fmt::Display;
use std::io;

use istore_core::ContactError;
use istore_storefront::{AppError, ConfigError, LineKey};
use thiserror::Error;

/// Errors reported by the `istore` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid contact details: {0}")]
    Contact(#[from] ContactError),

    #[error("Not in cart: {0}")]
    NotInCart(LineKey),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Comma-separated display of `items`.
fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
