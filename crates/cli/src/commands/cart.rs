//! Cart and pricing commands.
//!
//! Each command runs against an already started [`Session`], writes its
//! notices followed by the refreshed cart and totals, and returns.

use std::io::Write;

use cartsim_core::{KeyValueStore, Notice, ProductId, Session, ShippingRequest};
use tracing::info;

use crate::confirm::Confirm;
use crate::error::Result;
use crate::notify::notify_all;
use crate::render;

/// List the catalog.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn catalog<S: KeyValueStore, W: Write>(session: &Session<S>, out: &mut W) -> Result<()> {
    render::catalog(out, session.catalog())?;
    Ok(())
}

/// Show cart lines and the totals on display.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show<S: KeyValueStore, W: Write>(session: &Session<S>, out: &mut W) -> Result<()> {
    render::cart(out, session.cart())?;
    render::totals(out, session.totals(), session.shipping())?;
    Ok(())
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error for an unknown product id, a storage failure or a write
/// failure.
pub fn add<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    out: &mut W,
    id: ProductId,
) -> Result<()> {
    let notices = session.add(id)?;
    notify_all(out, &notices)?;
    show(session, out)
}

/// Remove a product line after confirmation.
///
/// Nothing is asked when the product isn't in the cart.
///
/// # Errors
///
/// Returns an error for a storage failure or a terminal I/O failure.
pub fn remove<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    out: &mut W,
    confirm: &mut dyn Confirm,
    id: ProductId,
) -> Result<()> {
    let Some(line) = session.cart().get(id) else {
        notify_all(out, &[Notice::NotInCart { id }])?;
        return Ok(());
    };

    let prompt = format!("Remove {}? This removes the product from the order.", line.name);
    if !confirm.confirm(out, &prompt)? {
        info!(%id, "Remove cancelled");
        writeln!(out, "Cancelled.")?;
        return Ok(());
    }

    let notices = session.remove(id)?;
    notify_all(out, &notices)?;
    show(session, out)
}

/// Clear the cart and its saved copy after confirmation.
///
/// # Errors
///
/// Returns an error for a storage failure or a terminal I/O failure.
pub fn clear<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    out: &mut W,
    confirm: &mut dyn Confirm,
) -> Result<()> {
    if !confirm.confirm(out, "Clear the cart and delete its saved data?")? {
        info!("Clear cancelled");
        writeln!(out, "Cancelled.")?;
        return Ok(());
    }

    let notices = session.clear()?;
    notify_all(out, &notices)?;
    show(session, out)
}

/// Price the order with the given shipping inputs.
///
/// With `json` set the totals are written as a JSON object instead of text.
///
/// # Errors
///
/// Returns [`crate::CliError::Pricing`] when shipping is requested without a
/// postal code; the totals on display are left unchanged.
pub fn quote<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    out: &mut W,
    request: ShippingRequest,
    json: bool,
) -> Result<()> {
    session.set_shipping(request);
    let totals = session.calculate()?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &totals).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        render::totals(out, &totals, session.shipping())?;
    }
    Ok(())
}
