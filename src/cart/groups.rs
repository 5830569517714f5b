//! Cart Groups

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::cart::{CartLine, DesignerRef, ProductRef, Subtotal};

/// A single cart line as shown under its color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Cart line identifier.
    pub id: Uuid,

    /// Units on this line.
    pub quantity: u32,

    /// Size label.
    pub size: String,
}

/// Lines of one product sharing a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGroup {
    /// Color name.
    pub color: String,

    /// Line items in cart order.
    pub items: SmallVec<[LineItem; 4]>,
}

/// Lines of one product, split by color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductGroup {
    /// Product identifier.
    pub product_id: Uuid,

    /// Product name.
    pub name: String,

    /// Product slug.
    pub slug: String,

    /// Unit wholesale price.
    pub wholesale_price: Decimal,

    /// Color groups in first-encountered order.
    pub colors: SmallVec<[ColorGroup; 4]>,

    /// Units across every color and size.
    pub total_quantity: u64,
}

impl ProductGroup {
    fn new(product: &ProductRef) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            wholesale_price: product.wholesale_price,
            colors: SmallVec::new(),
            total_quantity: 0,
        }
    }

    fn push(&mut self, line: &CartLine) {
        self.total_quantity += u64::from(line.quantity);

        let item = LineItem {
            id: line.id,
            quantity: line.quantity,
            size: line.size.clone(),
        };

        match self.colors.iter_mut().find(|group| group.color == line.color) {
            Some(group) => group.items.push(item),
            None => self.colors.push(ColorGroup {
                color: line.color.clone(),
                items: SmallVec::from_iter([item]),
            }),
        }
    }

    /// Number of distinct lines for this product.
    pub fn line_count(&self) -> usize {
        self.colors.iter().map(|group| group.items.len()).sum()
    }
}

/// Lines of every product from one designer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignerGroup {
    /// Designer name.
    pub name: String,

    /// Designer slug.
    pub slug: String,

    /// Cover image URL.
    pub cover_image: Option<String>,

    /// Minimum units per order for this designer.
    pub minimum_order_quantity: Option<u32>,

    /// Minimum order value for this designer.
    pub minimum_order_value: Option<Decimal>,

    /// Product groups in first-encountered order.
    pub products: Vec<ProductGroup>,

    /// Units across every product.
    pub total_quantity: u64,

    /// Number of distinct products.
    pub total_items: u32,

    /// Value of every line at wholesale price.
    pub total_amount: Decimal,
}

impl DesignerGroup {
    fn new(designer: &DesignerRef) -> Self {
        Self {
            name: designer.name.clone(),
            slug: designer.slug.clone(),
            cover_image: designer.cover_image.clone(),
            minimum_order_quantity: designer.minimum_order_quantity,
            minimum_order_value: designer.minimum_order_value,
            products: Vec::new(),
            total_quantity: 0,
            total_items: 0,
            total_amount: Decimal::ZERO,
        }
    }

    fn push(&mut self, line: &CartLine) {
        self.total_quantity += u64::from(line.quantity);
        self.total_amount += line.amount();

        if let Some(product) = self
            .products
            .iter_mut()
            .find(|product| product.product_id == line.product.id)
        {
            product.push(line);

            return;
        }

        let mut product = ProductGroup::new(&line.product);

        product.push(line);

        self.products.push(product);
        self.total_items += 1;
    }

    /// Whether the designer's minimum order quantity is met, when one is set.
    pub fn meets_minimum_quantity(&self) -> bool {
        self.minimum_order_quantity
            .is_none_or(|minimum| self.total_quantity >= u64::from(minimum))
    }

    /// Whether the designer's minimum order value is met, when one is set.
    pub fn meets_minimum_value(&self) -> bool {
        self.minimum_order_value
            .is_none_or(|minimum| self.total_amount >= minimum)
    }
}

/// Accumulator for the single pass over cart lines.
#[derive(Debug, Default)]
pub(super) struct Grouping {
    designers: Vec<DesignerGroup>,
    designer_index: FxHashMap<String, usize>,
    subtotals: Vec<Subtotal>,
    subtotal_index: FxHashMap<Uuid, usize>,
}

impl Grouping {
    pub(super) fn push(mut self, line: &CartLine) -> Self {
        let designer = &line.product.designer;

        let designer_index = match self.designer_index.get(&designer.name) {
            Some(&index) => index,
            None => {
                let index = self.designers.len();

                self.designers.push(DesignerGroup::new(designer));
                self.designer_index.insert(designer.name.clone(), index);

                index
            }
        };

        if let Some(group) = self.designers.get_mut(designer_index) {
            group.push(line);
        }

        let subtotal_index = match self.subtotal_index.get(&line.product.id) {
            Some(&index) => index,
            None => {
                let index = self.subtotals.len();

                self.subtotals.push(Subtotal {
                    product_id: line.product.id,
                    value: Decimal::ZERO,
                });
                self.subtotal_index.insert(line.product.id, index);

                index
            }
        };

        if let Some(subtotal) = self.subtotals.get_mut(subtotal_index) {
            subtotal.value += line.amount();
        }

        self
    }

    pub(super) fn finish(self) -> (Vec<DesignerGroup>, Vec<Subtotal>) {
        (self.designers, self.subtotals)
    }
}
