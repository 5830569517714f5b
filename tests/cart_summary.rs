//! Cart summary invariants over a spread of generated carts.
//!
//! Carts are built from every combination of a few designers, products, colors and sizes, with
//! quantities and prices chosen to exercise rounding at the half-cent.

use rust_decimal::{Decimal, RoundingStrategy};
use testresult::TestResult;
use uuid::Uuid;

use showroom::cart::{CartLine, CartSummary, DesignerRef, ProductRef};

const DESIGNERS: [&str; 3] = ["Atelier", "Maison", "Studio"];
const COLORS: [&str; 3] = ["Black", "Navy", "Ivory"];
const SIZES: [&str; 2] = ["S", "M"];

fn designer(name: &str) -> DesignerRef {
    DesignerRef {
        name: name.to_string(),
        slug: name.to_lowercase(),
        cover_image: None,
        minimum_order_quantity: None,
        minimum_order_value: None,
    }
}

fn product(id: Uuid, designer_name: &str, price: Decimal) -> ProductRef {
    ProductRef {
        id,
        name: format!("{designer_name} piece"),
        slug: format!("{}-piece", designer_name.to_lowercase()),
        wholesale_price: price,
        designer: designer(designer_name),
    }
}

/// A cart of `size` lines cycling through designers, products, colors and sizes.
fn generated_cart(size: usize, seed: u32) -> Vec<CartLine> {
    let products: Vec<ProductRef> = (0..4u32)
        .map(|index| {
            let designer_name = DESIGNERS
                .get(index as usize % DESIGNERS.len())
                .copied()
                .unwrap_or("Atelier");

            product(
                Uuid::from_u128(u128::from(index) + 1),
                designer_name,
                Decimal::new(i64::from(1_001 + seed * 37 + index * 250), 2),
            )
        })
        .collect();

    (0..size)
        .filter_map(|index| {
            let product = products.get((index * 7 + seed as usize) % products.len())?;

            Some(CartLine {
                id: Uuid::from_u128(1_000 + index as u128),
                product: product.clone(),
                color: COLORS.get(index % COLORS.len())?.to_string(),
                size: SIZES.get((index / COLORS.len()) % SIZES.len())?.to_string(),
                quantity: u32::try_from(index % 5 + 1).ok()?,
            })
        })
        .collect()
}

fn all_carts() -> impl Iterator<Item = Vec<CartLine>> {
    (1..=12).flat_map(|size| (0..5).map(move |seed| generated_cart(size, seed)))
}

#[test]
fn quantities_add_up_at_every_level() {
    for lines in all_carts() {
        let summary = CartSummary::from_lines(&lines);

        for designer in &summary.items_by_designers {
            let product_total: u64 = designer.products.iter().map(|p| p.total_quantity).sum();

            assert_eq!(product_total, designer.total_quantity, "designer {}", designer.name);

            for product in &designer.products {
                let line_total: u64 = product
                    .colors
                    .iter()
                    .flat_map(|color| color.items.iter())
                    .map(|item| u64::from(item.quantity))
                    .sum();

                assert_eq!(line_total, product.total_quantity, "product {}", product.name);
            }
        }
    }
}

#[test]
fn item_count_is_the_sum_of_quantities() {
    for lines in all_carts() {
        let summary = CartSummary::from_lines(&lines);
        let expected: u64 = lines.iter().map(|line| u64::from(line.quantity)).sum();

        assert_eq!(summary.total_item_count, expected, "{} lines", lines.len());
    }
}

#[test]
fn service_amount_is_total_plus_two_percent_rounded_half_up() -> TestResult {
    let factor: Decimal = "1.02".parse()?;

    for lines in all_carts() {
        let summary = CartSummary::from_lines(&lines);
        let expected = (summary.total_amount * factor)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        assert_eq!(summary.total_service_amount, expected, "total {}", summary.total_amount);
    }

    Ok(())
}

#[test]
fn subtotals_sum_to_the_total() {
    for lines in all_carts() {
        let summary = CartSummary::from_lines(&lines);
        let subtotal_sum: Decimal = summary.subtotals.iter().map(|subtotal| subtotal.value).sum();
        let designer_sum: Decimal = summary
            .items_by_designers
            .iter()
            .map(|designer| designer.total_amount)
            .sum();

        assert_eq!(subtotal_sum, summary.total_amount, "subtotals");
        assert_eq!(designer_sum, summary.total_amount, "designer totals");
    }
}

#[test]
fn every_line_appears_exactly_once() {
    for lines in all_carts() {
        let summary = CartSummary::from_lines(&lines);

        let mut grouped: Vec<Uuid> = summary
            .items_by_designers
            .iter()
            .flat_map(|designer| designer.products.iter())
            .flat_map(|product| product.colors.iter())
            .flat_map(|color| color.items.iter())
            .map(|item| item.id)
            .collect();

        let mut input: Vec<Uuid> = lines.iter().map(|line| line.id).collect();

        grouped.sort_unstable();
        input.sort_unstable();

        assert_eq!(grouped, input, "{} lines", lines.len());
    }
}

#[test]
fn aggregation_is_deterministic() {
    for lines in all_carts() {
        assert_eq!(
            CartSummary::from_lines(&lines),
            CartSummary::from_lines(&lines),
            "{} lines",
            lines.len()
        );
    }
}

#[test]
fn two_colors_of_one_product_share_a_product_group() -> TestResult {
    let coat = product(Uuid::from_u128(1), "Atelier", Decimal::from(50));

    let lines = [
        CartLine {
            id: Uuid::from_u128(10),
            product: coat.clone(),
            color: "Black".to_string(),
            size: "M".to_string(),
            quantity: 2,
        },
        CartLine {
            id: Uuid::from_u128(11),
            product: coat,
            color: "Navy".to_string(),
            size: "M".to_string(),
            quantity: 1,
        },
    ];

    let summary = CartSummary::from_lines(&lines);
    let designer = summary.items_by_designers.first().ok_or("missing designer")?;
    let group = designer.products.first().ok_or("missing product")?;

    assert_eq!(summary.items_by_designers.len(), 1);
    assert_eq!(designer.products.len(), 1);
    assert_eq!(group.total_quantity, 3);
    assert_eq!(group.colors.len(), 2);
    assert_eq!(summary.total_amount, Decimal::from(150));
    assert_eq!(summary.total_service_amount, Decimal::from(153));

    Ok(())
}

#[test]
fn empty_cart_has_zero_totals() {
    let summary = CartSummary::from_lines(&[]);

    assert!(summary.items_by_designers.is_empty());
    assert!(summary.subtotals.is_empty());
    assert_eq!(summary.total_amount, Decimal::ZERO);
    assert_eq!(summary.total_service_amount, Decimal::ZERO);
    assert_eq!(summary.total_item_count, 0);
}

#[test]
fn large_line_quantities_sum_without_wrapping() -> TestResult {
    let coat = product(Uuid::from_u128(1), "Atelier", Decimal::ONE);
    let largest = u32::try_from(i32::MAX)?;

    let lines: Vec<CartLine> = COLORS
        .iter()
        .enumerate()
        .map(|(index, color)| CartLine {
            id: Uuid::from_u128(100 + index as u128),
            product: coat.clone(),
            color: color.to_string(),
            size: "M".to_string(),
            quantity: largest,
        })
        .collect();

    let summary = CartSummary::from_lines(&lines);
    let expected = 3 * u64::from(largest);
    let designer = summary.items_by_designers.first().ok_or("missing designer")?;
    let group = designer.products.first().ok_or("missing product")?;

    assert_eq!(summary.total_item_count, expected);
    assert_eq!(designer.total_quantity, expected);
    assert_eq!(group.total_quantity, expected);
    assert_eq!(summary.total_amount, Decimal::from(expected));

    Ok(())
}
