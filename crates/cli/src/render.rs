//! Table rendering for counting lists

use domain::{CountItem, CountStatus};
use prettytable::{format, Cell, Row, Table};

fn qty(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

fn status_cell(status: CountStatus) -> Cell {
    match status {
        CountStatus::Pending => Cell::new("pending"),
        CountStatus::Counted => Cell::new("counted").style_spec("Fc"),
        CountStatus::Reviewed => Cell::new("reviewed").style_spec("Fg"),
    }
}

fn variance_cell(item: &CountItem) -> Cell {
    match item.variance() {
        None => Cell::new("-"),
        Some(v) if v < 0.0 => Cell::new(&qty(v)).style_spec("Fr"),
        Some(v) if v > 0.0 => Cell::new(&format!("+{}", qty(v))).style_spec("Fg"),
        Some(_) => Cell::new("0"),
    }
}

/// Build the counting list table
pub fn items_table(items: &[&CountItem]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(Row::new(vec![
        Cell::new("STATUS").style_spec("b"),
        Cell::new("ID").style_spec("b"),
        Cell::new("NAME").style_spec("b"),
        Cell::new("CATEGORY").style_spec("b"),
        Cell::new("EXPECTED").style_spec("b"),
        Cell::new("COUNTED").style_spec("b"),
        Cell::new("VARIANCE").style_spec("b"),
        Cell::new("LOCATION").style_spec("b"),
    ]));

    for item in items {
        table.add_row(Row::new(vec![
            status_cell(item.status()),
            Cell::new(item.id().as_str()),
            Cell::new(item.name()),
            Cell::new(item.category()),
            Cell::new(&format!("{} {}", qty(item.expected_qty()), item.unit())),
            Cell::new(&item.counted_qty().map_or("-".to_string(), qty)),
            variance_cell(item),
            Cell::new(item.location()),
        ]));
    }
    table
}

/// Print the counting list, or a placeholder when nothing matches
pub fn print_items(items: &[&CountItem]) {
    if items.is_empty() {
        println!("(no items match)");
        return;
    }
    items_table(items).printstd();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::ItemId;

    #[test]
    fn test_quantity_formatting() {
        assert_eq!(qty(45.0), "45");
        assert_eq!(qty(1.5), "1.50");
        assert_eq!(qty(-2.0), "-2");
    }

    #[test]
    fn test_table_has_one_row_per_item() {
        let mut item = CountItem::new(
            ItemId::new("itm-001").unwrap(),
            "Basil",
            "Produce",
            "bunch",
            3.0,
        )
        .unwrap();
        item.record_count(4.0, Utc::now()).unwrap();

        let items = [&item];
        let table = items_table(&items);
        assert_eq!(table.len(), 1);
    }
}
