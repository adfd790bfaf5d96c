//! Product catalog: products, brands, categories, and the shelves a level
//! lays them out on.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Produce,
    Dairy,
    Electronics,
    Pantry,
    Butcher,
    Beverage,
    Household,
}

impl Category {
    /// Shelf order, left to right.
    pub const ALL: [Category; 7] = [
        Category::Produce,
        Category::Dairy,
        Category::Electronics,
        Category::Pantry,
        Category::Butcher,
        Category::Beverage,
        Category::Household,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            Category::Produce => "♣",
            Category::Dairy => "◎",
            Category::Electronics => "▣",
            Category::Pantry => "▤",
            Category::Butcher => "♨",
            Category::Beverage => "◆",
            Category::Household => "✦",
        }
    }

    pub fn shelf_title(self) -> &'static str {
        match self {
            Category::Produce => "Fruit & Veg",
            Category::Dairy => "Dairy & Breakfast",
            Category::Electronics => "Electronics",
            Category::Pantry => "Pantry",
            Category::Butcher => "Meat & Poultry",
            Category::Beverage => "Drinks",
            Category::Household => "Household",
        }
    }

    /// Short tab label for narrow screens.
    pub fn short_title(self) -> &'static str {
        match self {
            Category::Produce => "Veg",
            Category::Dairy => "Dairy",
            Category::Electronics => "Tech",
            Category::Pantry => "Pantry",
            Category::Butcher => "Meat",
            Category::Beverage => "Drinks",
            Category::Household => "Home",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductId {
    Milk,
    Bread,
    Apple,
    Banana,
    OrangeJuice,
    Cereal,
    Cookies,
    Yogurt,
    Cheese,
    Chips,
    Smartphone,
    Headphones,
    Laptop,
    Pasta,
    Rice,
    OliveOil,
    EggCarton,
    Chicken,
    Beef,
    Sucuk,
    Fish,
    Water,
    Cola,
    FruitJuice,
    IcedTea,
    Tomato,
    Lettuce,
    Cucumber,
    Strawberry,
    Coffee,
    Tea,
    Soda,
    IceCream,
    Cleaner,
}

/// Every product, in catalog order. Shelves list variants in this order.
pub const CATALOG: [ProductId; 34] = [
    ProductId::Milk,
    ProductId::Bread,
    ProductId::Apple,
    ProductId::Banana,
    ProductId::OrangeJuice,
    ProductId::Cereal,
    ProductId::Cookies,
    ProductId::Yogurt,
    ProductId::Cheese,
    ProductId::Chips,
    ProductId::Smartphone,
    ProductId::Headphones,
    ProductId::Laptop,
    ProductId::Pasta,
    ProductId::Rice,
    ProductId::OliveOil,
    ProductId::EggCarton,
    ProductId::Chicken,
    ProductId::Beef,
    ProductId::Sucuk,
    ProductId::Fish,
    ProductId::Water,
    ProductId::Cola,
    ProductId::FruitJuice,
    ProductId::IcedTea,
    ProductId::Tomato,
    ProductId::Lettuce,
    ProductId::Cucumber,
    ProductId::Strawberry,
    ProductId::Coffee,
    ProductId::Tea,
    ProductId::Soda,
    ProductId::IceCream,
    ProductId::Cleaner,
];

impl ProductId {
    pub fn as_str(self) -> &'static str {
        product_info(self).id
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub struct BrandInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub short_code: &'static str,
}

#[derive(Debug)]
pub struct ProductInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub brands: &'static [BrandInfo],
}

const NO_BRANDS: &[BrandInfo] = &[];

const MILK_BRANDS: &[BrandInfo] = &[
    BrandInfo { id: "freshfarm", name: "FreshFarm Milk", short_code: "FF" },
    BrandInfo { id: "dailybarn", name: "DailyBarn Milk", short_code: "DB" },
    BrandInfo { id: "organicwave", name: "OrganicWave Milk", short_code: "OW" },
];

const BREAD_BRANDS: &[BrandInfo] = &[
    BrandInfo { id: "goldencrust", name: "GoldenCrust Bread", short_code: "GC" },
    BrandInfo { id: "homeloaf", name: "HomeLoaf Bread", short_code: "HL" },
];

const JUICE_BRANDS: &[BrandInfo] = &[
    BrandInfo { id: "citrusburst", name: "CitrusBurst Juice", short_code: "CB" },
    BrandInfo { id: "sunnyday", name: "SunnyDay Juice", short_code: "SD" },
];

const CEREAL_BRANDS: &[BrandInfo] = &[
    BrandInfo { id: "morningbites", name: "MorningBites Cereal", short_code: "MB" },
    BrandInfo { id: "crunchloops", name: "CrunchLoops Cereal", short_code: "CL" },
];

const YOGURT_BRANDS: &[BrandInfo] = &[
    BrandInfo { id: "coolcup", name: "CoolCup Yogurt", short_code: "CC" },
    BrandInfo { id: "farmfresh", name: "FarmFresh Yogurt", short_code: "FF" },
];

const CHIPS_BRANDS: &[BrandInfo] = &[
    BrandInfo { id: "crispster", name: "Crispster Chips", short_code: "CR" },
    BrandInfo { id: "saltblast", name: "SaltBlast Chips", short_code: "SB" },
];

pub fn product_info(id: ProductId) -> ProductInfo {
    use Category::*;
    use ProductId::*;

    let (key, name, category, brands) = match id {
        Milk => ("milk", "Milk", Dairy, MILK_BRANDS),
        Bread => ("bread", "Bread", Pantry, BREAD_BRANDS),
        Apple => ("apple", "Apple", Produce, NO_BRANDS),
        Banana => ("banana", "Banana", Produce, NO_BRANDS),
        OrangeJuice => ("orange-juice", "Orange Juice", Beverage, JUICE_BRANDS),
        Cereal => ("cereal", "Cereal", Pantry, CEREAL_BRANDS),
        Cookies => ("cookies", "Cookies", Pantry, NO_BRANDS),
        Yogurt => ("yogurt", "Yogurt", Dairy, YOGURT_BRANDS),
        Cheese => ("cheese", "Cheese", Dairy, NO_BRANDS),
        Chips => ("chips", "Chips", Pantry, CHIPS_BRANDS),
        Smartphone => ("smartphone", "Smartphone", Electronics, NO_BRANDS),
        Headphones => ("headphones", "Headphones", Electronics, NO_BRANDS),
        Laptop => ("laptop", "Laptop", Electronics, NO_BRANDS),
        Pasta => ("pasta", "Pasta", Pantry, NO_BRANDS),
        Rice => ("rice", "Rice", Pantry, NO_BRANDS),
        OliveOil => ("olive-oil", "Olive Oil", Pantry, NO_BRANDS),
        EggCarton => ("egg-carton", "Eggs", Pantry, NO_BRANDS),
        Chicken => ("chicken", "Chicken", Butcher, NO_BRANDS),
        Beef => ("beef", "Beef", Butcher, NO_BRANDS),
        Sucuk => ("sucuk", "Sucuk", Butcher, NO_BRANDS),
        Fish => ("fish", "Fish", Butcher, NO_BRANDS),
        Water => ("water", "Water", Beverage, NO_BRANDS),
        Cola => ("cola", "Cola", Beverage, NO_BRANDS),
        FruitJuice => ("fruit-juice", "Fruit Juice", Beverage, NO_BRANDS),
        IcedTea => ("iced-tea", "Iced Tea", Beverage, NO_BRANDS),
        Tomato => ("tomato", "Tomato", Produce, NO_BRANDS),
        Lettuce => ("lettuce", "Lettuce", Produce, NO_BRANDS),
        Cucumber => ("cucumber", "Cucumber", Produce, NO_BRANDS),
        Strawberry => ("strawberry", "Strawberry", Produce, NO_BRANDS),
        Coffee => ("coffee", "Coffee", Beverage, NO_BRANDS),
        Tea => ("tea", "Tea", Beverage, NO_BRANDS),
        Soda => ("soda", "Soda", Beverage, NO_BRANDS),
        IceCream => ("ice-cream", "Ice Cream", Dairy, NO_BRANDS),
        Cleaner => ("cleaner", "Cleaner", Household, NO_BRANDS),
    };

    ProductInfo { id: key, name, category, brands }
}

/// Which shelf assortment a level plays with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    /// Corner shop: one unbranded variant per product.
    Bakkal,
    /// Up to two brands per product.
    Market,
    /// Every brand.
    Supermarket,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Bakkal => "Corner Shop",
            GameMode::Market => "Market",
            GameMode::Supermarket => "Supermarket",
        }
    }
}

pub fn mode_for_level(level_id: u32) -> GameMode {
    match level_id {
        0..=20 => GameMode::Bakkal,
        21..=40 => GameMode::Market,
        _ => GameMode::Supermarket,
    }
}

/// What a shelf item is matched on: a product, optionally a specific brand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderKey {
    pub product: ProductId,
    pub brand: Option<&'static str>,
}

impl OrderKey {
    pub fn plain(product: ProductId) -> Self {
        Self { product, brand: None }
    }

    pub fn branded(product: ProductId, brand: &'static str) -> Self {
        Self { product, brand: Some(brand) }
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}__{}", self.product, self.brand.unwrap_or("default"))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    pub key: OrderKey,
    pub display_name: String,
    /// Brand short code, shown as a badge next to the name.
    pub badge: Option<&'static str>,
}

pub fn variants_for_mode(product: ProductId, mode: GameMode) -> Vec<Variant> {
    let info = product_info(product);
    let unbranded = || Variant {
        key: OrderKey::plain(product),
        display_name: info.name.to_string(),
        badge: None,
    };

    let brand_limit = match mode {
        GameMode::Bakkal => return vec![unbranded()],
        GameMode::Market => 2,
        GameMode::Supermarket => usize::MAX,
    };

    if info.brands.is_empty() {
        return vec![unbranded()];
    }

    info.brands
        .iter()
        .take(brand_limit)
        .map(|b| Variant {
            key: OrderKey::branded(product, b.id),
            display_name: b.name.to_string(),
            badge: Some(b.short_code),
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct Shelf {
    pub category: Category,
    pub variants: Vec<Variant>,
}

impl Shelf {
    pub fn title(&self) -> &'static str {
        self.category.shelf_title()
    }

    pub fn contains(&self, key: &OrderKey) -> bool {
        self.variants.iter().any(|v| v.key == *key)
    }
}

/// Shelves in category order. Categories with nothing on them are left out.
pub fn shelves_for_mode(mode: GameMode) -> Vec<Shelf> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let variants: Vec<Variant> = CATALOG
                .iter()
                .filter(|&&p| product_info(p).category == category)
                .flat_map(|&p| variants_for_mode(p, mode))
                .collect();
            (!variants.is_empty()).then_some(Shelf { category, variants })
        })
        .collect()
}

/// Human-readable name for an order key. Unknown brands fall back to the
/// product name with the raw brand id.
pub fn variant_name(key: &OrderKey) -> String {
    let info = product_info(key.product);
    match key.brand {
        None => info.name.to_string(),
        Some(brand) => match info.brands.iter().find(|b| b.id == brand) {
            Some(b) => b.name.to_string(),
            None => format!("{} ({})", info.name, brand),
        },
    }
}
