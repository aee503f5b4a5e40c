//! Checkout command.
//!
//! The engine clears the cart; this command owns the conversation around
//! it and points the user to the follow-up page.

use std::io::{self, BufRead, Write};

use puntaditas_core::Price;
use puntaditas_storefront::cart::{CartEngine, CheckoutOutcome, ConfirmCheckout, format_price};
use puntaditas_storefront::config::StorefrontConfig;
use puntaditas_storefront::error::AppError;
use puntaditas_storefront::store::KeyValueStore;

/// Asks for confirmation on a terminal.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, total: Price, item_count: u64) -> io::Result<bool> {
        writeln!(
            self.output,
            "Total to pay: {} ({item_count} items)",
            format_price(total)
        )?;
        write!(self.output, "Confirm purchase? [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "s" | "si"
        ))
    }
}

impl<R: BufRead, W: Write> ConfirmCheckout for TerminalPrompt<R, W> {
    fn confirm(&mut self, total: Price, item_count: u64) -> bool {
        self.ask(total, item_count).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read confirmation, treating as no");
            false
        })
    }
}

/// Check out and report the outcome.
pub fn run<S, P>(
    cart: &mut CartEngine<S>,
    prompt: &mut P,
    config: &StorefrontConfig,
    out: &mut impl Write,
) -> Result<(), AppError>
where
    S: KeyValueStore,
    P: ConfirmCheckout + ?Sized,
{
    match cart.checkout(prompt)? {
        CheckoutOutcome::Completed { total, item_count } => {
            tracing::info!(%total, item_count, "Purchase completed");
            writeln!(out, "Purchase completed! Paid {}", format_price(total))?;
            writeln!(out, "Continue at {}", config.checkout_url)?;
        }
        CheckoutOutcome::Declined => {
            writeln!(out, "Checkout cancelled, your cart was kept")?;
        }
    }
    Ok(())
}
