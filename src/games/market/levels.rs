//! Level definitions and market upgrade tiers.

use super::catalog::{OrderKey, ProductId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomerType {
    WalkIn,
    Online,
}

impl CustomerType {
    pub fn label(self) -> &'static str {
        match self {
            CustomerType::WalkIn => "Walk-in customer",
            CustomerType::Online => "Online order",
        }
    }
}

#[derive(Debug)]
pub struct OrderItem {
    pub product: ProductId,
    pub brand: Option<&'static str>,
    pub quantity: u32,
}

impl OrderItem {
    pub fn key(&self) -> OrderKey {
        OrderKey { product: self.product, brand: self.brand }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reward {
    pub coins: u32,
    pub xp: u32,
}

#[derive(Debug)]
pub struct LevelConfig {
    pub id: u32,
    pub customer: CustomerType,
    /// Seconds; `None` plays without a clock.
    pub time_limit: Option<u32>,
    pub items: &'static [OrderItem],
    pub reward: Reward,
    pub tips: &'static [&'static str],
    pub unlocks_online_orders: bool,
}

/// `order![Milk * 2, Bread * 1]` builds a static list of unbranded items.
macro_rules! order {
    ($($product:ident * $qty:literal),* $(,)?) => {
        &[$(OrderItem { product: ProductId::$product, brand: None, quantity: $qty }),*]
    };
}

const fn walk_in(
    id: u32,
    time_limit: Option<u32>,
    items: &'static [OrderItem],
    xp: u32,
    coins: u32,
) -> LevelConfig {
    LevelConfig {
        id,
        customer: CustomerType::WalkIn,
        time_limit,
        items,
        reward: Reward { coins, xp },
        tips: &[],
        unlocks_online_orders: false,
    }
}

const fn online(
    id: u32,
    time_limit: u32,
    items: &'static [OrderItem],
    xp: u32,
    coins: u32,
) -> LevelConfig {
    LevelConfig {
        id,
        customer: CustomerType::Online,
        time_limit: Some(time_limit),
        items,
        reward: Reward { coins, xp },
        tips: &[],
        unlocks_online_orders: false,
    }
}

const fn with_tips(mut level: LevelConfig, tips: &'static [&'static str]) -> LevelConfig {
    level.tips = tips;
    level
}

/// Levels 1-5 teach the loop, 6-10 are plain walk-ins, 11-15 bring more
/// variety, 16-20 are online orders.
pub static LEVELS: [LevelConfig; 20] = [
    with_tips(
        walk_in(1, None, order![Milk * 2], 20, 15),
        &[
            "Read the order card and note how many of each item.",
            "Tap Start, then pick the milk from the shelf.",
        ],
    ),
    with_tips(
        walk_in(2, None, order![Milk * 1, Bread * 2], 25, 18),
        &[
            "Now there is more than one kind of product.",
            "Tapping the right product puts it in the basket.",
        ],
    ),
    with_tips(
        walk_in(3, Some(120), order![Milk * 1, Bread * 1, Apple * 3], 35, 22),
        &[
            "Collect every item before heading to the checkout.",
            "Scan the items one by one at the till.",
        ],
    ),
    with_tips(
        walk_in(
            4,
            Some(120),
            order![Milk * 1, Bread * 1, Apple * 2, OrangeJuice * 1],
            40,
            25,
        ),
        &["At packing, move each item into the box."],
    ),
    with_tips(
        walk_in(
            5,
            Some(110),
            order![Milk * 1, Bread * 1, Apple * 2, OrangeJuice * 1, Cookies * 1],
            50,
            30,
        ),
        &["You know the whole routine now, have fun!"],
    ),
    walk_in(6, Some(100), order![Milk * 2, Bread * 2, Banana * 3], 55, 32),
    walk_in(
        7,
        Some(95),
        order![Yogurt * 2, Apple * 2, OrangeJuice * 1, Cookies * 1],
        60,
        35,
    ),
    walk_in(
        8,
        Some(90),
        order![Milk * 1, Bread * 1, Banana * 3, Chips * 2, Water * 2],
        65,
        38,
    ),
    walk_in(
        9,
        Some(85),
        order![Cheese * 2, Pasta * 2, Tomato * 3, Lettuce * 1, Soda * 2],
        70,
        42,
    ),
    walk_in(
        10,
        Some(80),
        order![Milk * 2, Yogurt * 2, OrangeJuice * 2, Cookies * 2, Chips * 2],
        75,
        46,
    ),
    walk_in(
        11,
        Some(80),
        order![Milk * 2, Bread * 2, OrangeJuice * 1, Chips * 1],
        80,
        50,
    ),
    walk_in(
        12,
        Some(75),
        order![Milk * 1, Yogurt * 2, Coffee * 1, Bread * 2, Chips * 2],
        85,
        55,
    ),
    walk_in(
        13,
        Some(75),
        order![Milk * 2, OrangeJuice * 2, Cereal * 1, Coffee * 1, IceCream * 2],
        90,
        58,
    ),
    walk_in(
        14,
        Some(70),
        order![Milk * 1, Bread * 1, Cereal * 2, Chips * 2, Soda * 2, Cookies * 2],
        95,
        60,
    ),
    LevelConfig {
        unlocks_online_orders: true,
        ..walk_in(
            15,
            Some(70),
            order![Milk * 2, Bread * 2, Yogurt * 2, Coffee * 1, Chips * 1, Water * 2],
            110,
            70,
        )
    },
    online(
        16,
        65,
        order![Milk * 2, Cereal * 2, Banana * 3, Coffee * 1, Water * 3],
        120,
        75,
    ),
    online(
        17,
        60,
        order![Milk * 2, Cereal * 2, Chips * 2, OrangeJuice * 2, Cookies * 2, Cleaner * 1],
        125,
        80,
    ),
    online(
        18,
        60,
        order![Milk * 2, Bread * 2, Yogurt * 2, IceCream * 2, Pasta * 2, Tomato * 4],
        130,
        85,
    ),
    online(
        19,
        55,
        order![Milk * 3, Cereal * 2, Coffee * 2, Chips * 2, OrangeJuice * 2, Cookies * 3],
        140,
        90,
    ),
    online(
        20,
        50,
        order![Milk * 3, Bread * 3, Yogurt * 2, IceCream * 2, Coffee * 2, Tea * 2, Cleaner * 1],
        160,
        110,
    ),
];

pub fn level_by_id(id: u32) -> Option<&'static LevelConfig> {
    LEVELS.iter().find(|l| l.id == id)
}

pub fn levels_by_customer(customer: CustomerType) -> impl Iterator<Item = &'static LevelConfig> {
    LEVELS.iter().filter(move |l| l.customer == customer)
}

#[derive(Debug)]
pub struct UpgradeTier {
    pub level: u32,
    pub name: &'static str,
    pub description: &'static str,
}

pub const UPGRADE_TIERS: [UpgradeTier; 5] = [
    UpgradeTier {
        level: 1,
        name: "Corner Shop",
        description: "One aisle, one till, a lot of heart.",
    },
    UpgradeTier {
        level: 2,
        name: "Fresh Corner",
        description: "Fruit and veg crates out front.",
    },
    UpgradeTier {
        level: 3,
        name: "Neighbourhood Market",
        description: "Chilled fridges for dairy and drinks.",
    },
    UpgradeTier {
        level: 4,
        name: "City Market",
        description: "A butcher counter and a second till.",
    },
    UpgradeTier {
        level: 5,
        name: "Supermarket",
        description: "An electronics aisle and self-checkout.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::market::catalog::{mode_for_level, shelves_for_mode};

    #[test]
    fn ids_are_sequential() {
        for (i, level) in LEVELS.iter().enumerate() {
            assert_eq!(level.id, i as u32 + 1);
        }
    }

    #[test]
    fn lookup() {
        let first = level_by_id(1).unwrap();
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.items[0].quantity, 2);
        assert_eq!(first.reward, Reward { coins: 15, xp: 20 });
        assert!(first.time_limit.is_none());
        assert!(level_by_id(0).is_none());
        assert!(level_by_id(21).is_none());
    }

    #[test]
    fn customer_split() {
        assert_eq!(levels_by_customer(CustomerType::WalkIn).count(), 15);
        let online: Vec<u32> = levels_by_customer(CustomerType::Online).map(|l| l.id).collect();
        assert_eq!(online, (16..=20).collect::<Vec<_>>());
    }

    #[test]
    fn only_level_fifteen_unlocks_online_orders() {
        let unlockers: Vec<u32> = LEVELS
            .iter()
            .filter(|l| l.unlocks_online_orders)
            .map(|l| l.id)
            .collect();
        assert_eq!(unlockers, vec![15]);
    }

    #[test]
    fn tutorial_levels_carry_tips() {
        for level in LEVELS.iter() {
            assert_eq!(!level.tips.is_empty(), level.id <= 5, "level {}", level.id);
        }
    }

    #[test]
    fn every_order_key_is_on_a_shelf() {
        for level in LEVELS.iter() {
            let shelves = shelves_for_mode(mode_for_level(level.id));
            for item in level.items {
                let key = item.key();
                assert!(
                    shelves.iter().any(|s| s.contains(&key)),
                    "level {} wants {} which no shelf carries",
                    level.id,
                    key
                );
            }
        }
    }

    #[test]
    fn quantities_are_positive() {
        for level in LEVELS.iter() {
            assert!(level.items.iter().all(|i| i.quantity > 0), "level {}", level.id);
        }
    }

    #[test]
    fn upgrade_tiers_ascend() {
        let levels: Vec<u32> = UPGRADE_TIERS.iter().map(|t| t.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5]);
    }
}
