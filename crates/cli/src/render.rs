//! Plain-text rendering of catalog, cart and totals.

use std::io::{self, Write};

use cartsim_core::{Cart, Catalog, PricingResult, ShippingRequest};

/// List every product with its id and price.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn catalog<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "Catalog")?;
    if catalog.is_empty() {
        writeln!(out, "  (no products)")?;
    }
    for product in catalog.products() {
        writeln!(out, "  [{}] {} {}", product.id, product.name, product.price)?;
    }
    Ok(())
}

/// List cart lines as `name x quantity - line total`, then the item count.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn cart<W: Write>(out: &mut W, cart: &Cart) -> io::Result<()> {
    writeln!(out, "Cart")?;
    if cart.is_empty() {
        return writeln!(out, "  The cart is empty.");
    }
    for line in cart.lines() {
        let line_total = line
            .line_total()
            .map_or_else(|| "n/a".to_string(), |total| total.to_string());
        writeln!(
            out,
            "  [{}] {} x {} - {line_total}",
            line.id, line.name, line.quantity
        )?;
    }
    writeln!(out, "  Items: {}", cart.total_quantity())
}

/// Show the four pricing figures.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn totals<W: Write>(
    out: &mut W,
    totals: &PricingResult,
    shipping: &ShippingRequest,
) -> io::Result<()> {
    let destination = if shipping.requested {
        format!(" (to {})", shipping.postal_code.trim())
    } else {
        String::new()
    };
    writeln!(out, "Subtotal: {}", totals.subtotal)?;
    writeln!(out, "Shipping: {}{destination}", totals.shipping)?;
    writeln!(out, "Tax (21%): {}", totals.tax_amount)?;
    writeln!(out, "Total: {}", totals.total)
}

#[cfg(test)]
mod tests {
    use cartsim_core::{Money, Product, ProductId};

    use super::*;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_catalog_lists_products() {
        let catalog = Catalog::new(vec![Product::new(1, "Widget", Money::whole(100))]).unwrap();
        let text = render(|out| super::catalog(out, &catalog));
        assert_eq!(text, "Catalog\n  [1] Widget $100.00\n");
    }

    #[test]
    fn test_empty_cart() {
        let text = render(|out| super::cart(out, &Cart::new()));
        assert!(text.contains("The cart is empty."));
    }

    #[test]
    fn test_cart_lines_show_line_totals() {
        let catalog =
            Catalog::new(vec![Product::new(3, "Lamp", Money::from_cents(1250))]).unwrap();
        let mut c = Cart::new();
        c.add(ProductId::new(3), &catalog).unwrap();
        c.add(ProductId::new(3), &catalog).unwrap();
        let text = render(|out| super::cart(out, &c));
        assert!(text.contains("[3] Lamp x 2 - $25.00"));
        assert!(text.ends_with("  Items: 2\n"));
    }

    #[test]
    fn test_totals() {
        let result = PricingResult {
            subtotal: Money::whole(9500),
            shipping: Money::whole(1250),
            tax_amount: Money::from_cents(225_750),
            total: Money::from_cents(1_300_750),
        };
        let text = render(|out| totals(out, &result, &ShippingRequest::to("2000")));
        assert_eq!(
            text,
            concat!(
                "Subtotal: $9500.00\n",
                "Shipping: $1250.00 (to 2000)\n",
                "Tax (21%): $2257.50\n",
                "Total: $13007.50\n",
            )
        );
    }
}
