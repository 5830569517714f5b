//! Cart Handlers

pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod remove_product;

#[cfg(test)]
pub(crate) mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use showroom::cart::{CartLine, CartSummary, DesignerRef, ProductRef};

    pub(crate) fn make_line(product: Uuid, color: &str, size: &str, quantity: u32) -> CartLine {
        CartLine {
            id: Uuid::now_v7(),
            product: ProductRef {
                id: product,
                name: "Wool Coat".to_string(),
                slug: "wool-coat".to_string(),
                wholesale_price: Decimal::new(12_000, 2),
                designer: DesignerRef {
                    name: "Atelier".to_string(),
                    slug: "atelier".to_string(),
                    cover_image: None,
                    minimum_order_quantity: Some(5),
                    minimum_order_value: None,
                },
            },
            color: color.to_string(),
            size: size.to_string(),
            quantity,
        }
    }

    pub(crate) fn make_summary() -> CartSummary {
        let product = Uuid::now_v7();

        CartSummary::from_lines(&[
            make_line(product, "Black", "S", 2),
            make_line(product, "Black", "M", 1),
        ])
    }
}
