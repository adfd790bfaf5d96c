//! Order sheet: what the customer asked for versus what is in the basket.
//!
//! Matching is exact. An item counts only if its key is on the order and
//! its quota is not yet met.

use super::catalog::{OrderKey, Shelf};
use super::levels::OrderItem;

#[derive(Clone, Debug, PartialEq)]
pub struct OrderLine {
    pub key: OrderKey,
    pub required: u32,
    pub collected: u32,
}

impl OrderLine {
    pub fn remaining(&self) -> u32 {
        self.required.saturating_sub(self.collected)
    }

    pub fn is_done(&self) -> bool {
        self.collected >= self.required
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    NotInOrder,
    QuotaMet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectResult {
    Accepted { remaining: u32 },
    Rejected(RejectReason),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderSheet {
    /// One line per distinct key, in first-seen order.
    pub lines: Vec<OrderLine>,
    /// Collected keys in pick order.
    pub basket: Vec<OrderKey>,
}

impl OrderSheet {
    /// Build from a level's items. Repeated keys are merged and summed;
    /// zero-quantity items are ignored.
    pub fn from_items(items: &[OrderItem]) -> Self {
        let mut lines: Vec<OrderLine> = Vec::new();
        for item in items.iter().filter(|i| i.quantity > 0) {
            let key = item.key();
            match lines.iter_mut().find(|l| l.key == key) {
                Some(line) => line.required = line.required.saturating_add(item.quantity),
                None => lines.push(OrderLine { key, required: item.quantity, collected: 0 }),
            }
        }
        Self { lines, basket: Vec::new() }
    }

    fn line(&self, key: &OrderKey) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.key == *key)
    }

    pub fn try_collect(&mut self, key: OrderKey) -> CollectResult {
        let Some(line) = self.lines.iter_mut().find(|l| l.key == key) else {
            return CollectResult::Rejected(RejectReason::NotInOrder);
        };
        if line.is_done() {
            return CollectResult::Rejected(RejectReason::QuotaMet);
        }
        line.collected += 1;
        let remaining = line.remaining();
        self.basket.push(key);
        CollectResult::Accepted { remaining }
    }

    /// Every line collected exactly. An empty order is trivially complete.
    pub fn is_complete(&self) -> bool {
        self.lines.iter().all(|l| l.collected == l.required)
    }

    pub fn remaining(&self, key: &OrderKey) -> u32 {
        self.line(key).map_or(0, OrderLine::remaining)
    }

    /// Is `key` still wanted? Used to highlight shelf items.
    pub fn is_wanted(&self, key: &OrderKey) -> bool {
        self.remaining(key) > 0
    }

    pub fn is_done(&self, key: &OrderKey) -> bool {
        self.line(key).is_some_and(OrderLine::is_done)
    }

    pub fn highlight_keys(&self) -> Vec<OrderKey> {
        self.lines.iter().filter(|l| !l.is_done()).map(|l| l.key).collect()
    }

    pub fn done_keys(&self) -> Vec<OrderKey> {
        self.lines.iter().filter(|l| l.is_done()).map(|l| l.key).collect()
    }

    pub fn total_required(&self) -> u32 {
        self.lines.iter().map(|l| l.required).sum()
    }

    pub fn total_collected(&self) -> u32 {
        self.lines.iter().map(|l| l.collected).sum()
    }

    /// Each line expanded into `required` copies of its key, in order.
    pub fn checkout_queue(&self) -> Vec<OrderKey> {
        self.lines
            .iter()
            .flat_map(|l| std::iter::repeat(l.key).take(l.required as usize))
            .collect()
    }

    /// First shelf that carries anything on the order, or 0.
    pub fn default_shelf_index(&self, shelves: &[Shelf]) -> usize {
        shelves
            .iter()
            .position(|s| self.lines.iter().any(|l| s.contains(&l.key)))
            .unwrap_or(0)
    }
}

pub fn shelf_for_key(shelves: &[Shelf], key: &OrderKey) -> Option<usize> {
    shelves.iter().position(|s| s.contains(key))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::games::market::catalog::{ProductId, CATALOG};
    use proptest::prelude::*;

    fn arb_product() -> impl Strategy<Value = ProductId> {
        prop::sample::select(CATALOG.to_vec())
    }

    proptest! {
        #[test]
        fn prop_collected_never_exceeds_required(
            order in prop::collection::vec((arb_product(), 1u32..5), 1..6),
            picks in prop::collection::vec(arb_product(), 0..40),
        ) {
            let items: Vec<OrderItem> = order
                .iter()
                .map(|&(product, quantity)| OrderItem { product, brand: None, quantity })
                .collect();
            let mut sheet = OrderSheet::from_items(&items);
            for p in picks {
                sheet.try_collect(OrderKey::plain(p));
                for line in &sheet.lines {
                    prop_assert!(line.collected <= line.required);
                }
            }
            prop_assert_eq!(sheet.basket.len() as u32, sheet.total_collected());
        }

        #[test]
        fn prop_queue_picks_complete_the_order(
            order in prop::collection::vec((arb_product(), 1u32..5), 1..6),
        ) {
            let items: Vec<OrderItem> = order
                .iter()
                .map(|&(product, quantity)| OrderItem { product, brand: None, quantity })
                .collect();
            let mut sheet = OrderSheet::from_items(&items);
            for key in sheet.checkout_queue() {
                let accepted = matches!(sheet.try_collect(key), CollectResult::Accepted { .. });
                prop_assert!(accepted);
            }
            prop_assert!(sheet.is_complete());
            prop_assert_eq!(sheet.total_collected(), sheet.total_required());
        }
    }
}
