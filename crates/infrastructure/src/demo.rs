//! Built-in demonstration dataset
//!
//! Substituted for the backend item list when a session load fails and
//! the demo fallback is enabled, so a kiosk device stays usable offline.
//! The set is fixed: same items, same expected quantities, every run.

use domain::{Barcode, CountItem, ItemId};

/// The fixed demo counting session
pub fn demo_items() -> Vec<CountItem> {
    let specs: &[(&str, &str, &str, &str, f64, Option<&str>, &str)] = &[
        (
            "demo-001",
            "San Marzano Tomatoes",
            "Produce",
            "kg",
            45.0,
            Some("8001234000011"),
            "Dry store, shelf 2",
        ),
        (
            "demo-002",
            "Mozzarella di Bufala",
            "Dairy",
            "kg",
            12.0,
            Some("8001234000028"),
            "Walk-in fridge",
        ),
        (
            "demo-003",
            "Flour 00",
            "Dry goods",
            "kg",
            75.0,
            Some("8001234000035"),
            "Dry store, shelf 1",
        ),
        (
            "demo-004",
            "Extra Virgin Olive Oil",
            "Dry goods",
            "l",
            18.0,
            Some("8001234000042"),
            "Dry store, shelf 3",
        ),
        (
            "demo-005",
            "Fresh Basil",
            "Produce",
            "bunch",
            15.0,
            None,
            "Walk-in fridge",
        ),
        (
            "demo-006",
            "Chicken Breast",
            "Meat",
            "kg",
            22.0,
            Some("8001234000066"),
            "Freezer A",
        ),
        (
            "demo-007",
            "House Red Wine",
            "Beverages",
            "bottle",
            36.0,
            Some("8001234000073"),
            "Cellar",
        ),
        (
            "demo-008",
            "Espresso Beans",
            "Beverages",
            "kg",
            9.0,
            Some("8001234000080"),
            "Bar store",
        ),
    ];

    specs
        .iter()
        .map(|(id, name, category, unit, expected, barcode, location)| {
            let mut item = CountItem::new(
                ItemId::new(*id).expect("demo item id is non-empty"),
                *name,
                *category,
                *unit,
                *expected,
            )
            .expect("demo item is valid")
            .with_location(*location);
            if let Some(code) = barcode {
                item = item.with_barcode(Barcode::new(*code).expect("demo barcode is non-empty"));
            }
            item
        })
        .collect()
}
