//! Till: scan every item, then pack every item.

use super::catalog::OrderKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckoutStage {
    Scan,
    Pack,
    Done,
}

/// What one press at the till did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckoutStep {
    Scanned(OrderKey),
    /// The last item went through the scanner; packing starts next.
    ScanFinished(OrderKey),
    Packed(OrderKey),
    /// The last item went into the box. Reported once.
    PackFinished,
    /// Nothing left to do.
    Idle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Checkout {
    pub queue: Vec<OrderKey>,
    pub stage: CheckoutStage,
    pub scanned: usize,
    pub packed: usize,
}

impl Checkout {
    pub fn new(queue: Vec<OrderKey>) -> Self {
        Self { queue, stage: CheckoutStage::Scan, scanned: 0, packed: 0 }
    }

    pub fn advance(&mut self) -> CheckoutStep {
        match self.stage {
            CheckoutStage::Scan => {
                let Some(&key) = self.queue.get(self.scanned) else {
                    // Nothing to scan or pack.
                    self.stage = CheckoutStage::Done;
                    return CheckoutStep::PackFinished;
                };
                self.scanned += 1;
                if self.scanned == self.queue.len() {
                    self.stage = CheckoutStage::Pack;
                    CheckoutStep::ScanFinished(key)
                } else {
                    CheckoutStep::Scanned(key)
                }
            }
            CheckoutStage::Pack => {
                let key = self.queue[self.packed];
                self.packed += 1;
                if self.packed == self.queue.len() {
                    self.stage = CheckoutStage::Done;
                    CheckoutStep::PackFinished
                } else {
                    CheckoutStep::Packed(key)
                }
            }
            CheckoutStage::Done => CheckoutStep::Idle,
        }
    }

    /// The item the next press acts on.
    pub fn current(&self) -> Option<OrderKey> {
        match self.stage {
            CheckoutStage::Scan => self.queue.get(self.scanned).copied(),
            CheckoutStage::Pack => self.queue.get(self.packed).copied(),
            CheckoutStage::Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.stage == CheckoutStage::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::market::catalog::ProductId;

    fn milk() -> OrderKey {
        OrderKey::plain(ProductId::Milk)
    }

    fn apple() -> OrderKey {
        OrderKey::plain(ProductId::Apple)
    }

    #[test]
    fn scan_then_pack_then_done() {
        let mut c = Checkout::new(vec![milk(), milk(), apple()]);
        assert_eq!(c.current(), Some(milk()));
        assert_eq!(c.advance(), CheckoutStep::Scanned(milk()));
        assert_eq!(c.advance(), CheckoutStep::Scanned(milk()));
        assert_eq!(c.advance(), CheckoutStep::ScanFinished(apple()));
        assert_eq!(c.stage, CheckoutStage::Pack);
        assert_eq!(c.current(), Some(milk()));

        assert_eq!(c.advance(), CheckoutStep::Packed(milk()));
        assert_eq!(c.advance(), CheckoutStep::Packed(milk()));
        assert_eq!(c.advance(), CheckoutStep::PackFinished);
        assert!(c.is_done());
        assert_eq!(c.current(), None);
    }

    #[test]
    fn pack_finished_fires_once() {
        let mut c = Checkout::new(vec![milk()]);
        c.advance();
        assert_eq!(c.advance(), CheckoutStep::PackFinished);
        assert_eq!(c.advance(), CheckoutStep::Idle);
        assert_eq!(c.advance(), CheckoutStep::Idle);
    }

    #[test]
    fn empty_queue_finishes_on_first_press() {
        let mut c = Checkout::new(Vec::new());
        assert_eq!(c.current(), None);
        assert_eq!(c.advance(), CheckoutStep::PackFinished);
        assert!(c.is_done());
        assert_eq!(c.advance(), CheckoutStep::Idle);
    }
}
