//! Interactive single-session loop.
//!
//! Keeps one [`Session`] alive across commands so shipping inputs and the
//! displayed totals carry over, the way a page stays open in a browser.

use std::io::{BufRead, Write};

use cartsim_core::{KeyValueStore, ProductId, Session, ShippingRequest};
use tracing::warn;

use super::cart;
use crate::confirm::ReadConfirm;
use crate::error::{CliError, Result};
use crate::notify::notify_all;

const HELP: &str = "\
Commands:
  catalog         list products
  cart            show cart and totals
  add <id>        add one unit of a product
  remove <id>     remove a product (asks first)
  clear           empty the cart (asks first)
  ship <code>     ship to a postal code and recalculate
  noship          turn shipping off and recalculate
  total           recalculate with current inputs
  help            show this help
  quit            leave";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Catalog,
    Cart,
    Add(ProductId),
    Remove(ProductId),
    Clear,
    Ship(String),
    NoShip,
    Total,
    Help,
    Quit,
}

fn parse(line: &str) -> std::result::Result<Option<Command>, CliError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let id = || -> std::result::Result<ProductId, CliError> {
        rest.first()
            .ok_or_else(|| CliError::InvalidInput(format!("`{word}` needs a product id")))?
            .parse()
            .map_err(|_| {
                CliError::InvalidInput(format!("`{}` is not a product id", rest.join(" ")))
            })
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "catalog" | "products" => Command::Catalog,
        "cart" | "show" => Command::Cart,
        "add" => Command::Add(id()?),
        "remove" | "rm" => Command::Remove(id()?),
        "clear" => Command::Clear,
        // An empty code is passed through so pricing reports it.
        "ship" => Command::Ship(rest.join(" ")),
        "noship" => Command::NoShip,
        "total" | "calc" => Command::Total,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CliError::InvalidInput(format!("unknown command `{other}`"))),
    };
    Ok(Some(command))
}

/// Run the loop until `quit` or end of input.
///
/// Errors from individual commands are reported and the loop continues.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run<S: KeyValueStore, R: BufRead, W: Write>(
    session: &mut Session<S>,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    cart::catalog(session, out)?;
    cart::show(session, out)?;
    writeln!(out, "Type `help` for commands.")?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "[error] {e}")?;
                continue;
            }
        };

        let result = match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}").map_err(CliError::from),
            Command::Catalog => cart::catalog(session, out),
            Command::Cart => cart::show(session, out),
            Command::Add(id) => cart::add(session, out, id),
            Command::Remove(id) => cart::remove(session, out, &mut ReadConfirm(&mut input), id),
            Command::Clear => cart::clear(session, out, &mut ReadConfirm(&mut input)),
            Command::Ship(code) => {
                cart::quote(session, out, ShippingRequest::to(code), false)
            }
            Command::NoShip => cart::quote(session, out, ShippingRequest::none(), false),
            Command::Total => {
                let request = session.shipping().clone();
                cart::quote(session, out, request, false)
            }
        };

        if let Err(e) = result {
            match e {
                CliError::Io(e) => return Err(e.into()),
                other => {
                    warn!(error = %other, "Shell command failed");
                    match other.notice() {
                        Some(notice) => notify_all(out, &[notice])?,
                        None => writeln!(out, "[error] {other}")?,
                    }
                }
            }
        }
    }

    Ok(())
}
