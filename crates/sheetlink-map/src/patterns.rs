//! Keyword pattern lists for header detection.
//!
//! Each required column carries a fixed list of lowercase keywords. A header
//! equal to a keyword is an exact match; a header containing a keyword is a
//! partial match weighted by how much of the header the keyword covers.

use sheetlink_model::RequiredColumn;

const DATE: &[&str] = &["date", "purchase date", "order date", "bought", "purchased"];

const SALE_PRICE: &[&str] = &[
    "sale price",
    "price",
    "sell price",
    "list price",
    "selling price",
];

const NAME: &[&str] = &[
    "name",
    "item name",
    "product name",
    "item",
    "title",
    "product",
    "description",
];

const SIZE_COLOR: &[&str] = &["size/color", "size", "color", "colour", "variation", "variant"];

const UNITS_IN_BUNDLE: &[&str] = &[
    "# units in bundle",
    "units in bundle",
    "bundle",
    "units per bundle",
    "bundle units",
];

const AMOUNT_PURCHASED: &[&str] = &[
    "amount purchased",
    "amount",
    "quantity",
    "qty",
    "units purchased",
    "units bought",
];

const ASIN: &[&str] = &["asin", "amazon asin", "asin number"];

const COGS: &[&str] = &[
    "cogs",
    "cost",
    "unit cost",
    "cost of goods",
    "cost per unit",
    "buy price",
];

const ORDER_NUMBER: &[&str] = &[
    "order #",
    "order number",
    "order id",
    "order no",
    "po number",
    "po #",
    "purchase order",
];

const PREP_NOTES: &[&str] = &[
    "prep notes",
    "prep",
    "notes",
    "note",
    "instructions",
    "comments",
    "remarks",
];

/// Keyword list for a required column.
pub fn column_patterns(column: RequiredColumn) -> &'static [&'static str] {
    match column {
        RequiredColumn::Date => DATE,
        RequiredColumn::SalePrice => SALE_PRICE,
        RequiredColumn::Name => NAME,
        RequiredColumn::SizeColor => SIZE_COLOR,
        RequiredColumn::UnitsInBundle => UNITS_IN_BUNDLE,
        RequiredColumn::AmountPurchased => AMOUNT_PURCHASED,
        RequiredColumn::Asin => ASIN,
        RequiredColumn::Cogs => COGS,
        RequiredColumn::OrderNumber => ORDER_NUMBER,
        RequiredColumn::PrepNotes => PREP_NOTES,
    }
}
