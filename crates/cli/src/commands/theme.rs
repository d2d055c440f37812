//! Theme preference commands.

use std::io::Write;

use istore_core::Theme;
use istore_storefront::Storefront;

use super::CliError;

/// Print the current theme.
///
/// # Errors
///
/// Returns `CliError::Io` if the output cannot be written.
pub fn show(shop: &Storefront, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "{}", shop.theme())?;
    Ok(())
}

/// Flip the theme and print the new one.
///
/// # Errors
///
/// Returns `CliError::Io` if the output cannot be written.
pub fn toggle(shop: &mut Storefront, out: &mut dyn Write) -> Result<(), CliError> {
    let theme = shop.toggle_theme();
    writeln!(out, "{theme}")?;
    Ok(())
}

/// Switch to `theme`.
///
/// # Errors
///
/// Returns `CliError::Io` if the output cannot be written.
pub fn set(shop: &mut Storefront, theme: Theme, out: &mut dyn Write) -> Result<(), CliError> {
    shop.set_theme(theme);
    writeln!(out, "{}", shop.theme())?;
    Ok(())
}
