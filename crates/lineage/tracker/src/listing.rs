//! Index / Name / Type tables for registry query results.
//!
//! Queries return data; callers that want a human-readable view pass the
//! already computed entries here.

use tabled::settings::object::Columns;
use tabled::settings::{Modify, Style, Width};
use tabled::{Table, Tabled};

use crate::config::{ListingConfig, ListingStyle};
use crate::registry::RegistryEntry;

/// Table row for listing display
#[derive(Debug, Tabled)]
struct ListingRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
}

impl From<&RegistryEntry> for ListingRow {
    fn from(e: &RegistryEntry) -> Self {
        Self {
            index: e.index,
            name: e.name.clone(),
            kind: e.kind.to_string(),
        }
    }
}

/// Render entries as a three-column table.
pub fn render<'a, I>(entries: I, config: &ListingConfig) -> String
where
    I: IntoIterator<Item = &'a RegistryEntry>,
{
    let rows: Vec<ListingRow> = entries.into_iter().map(ListingRow::from).collect();
    let mut table = Table::new(rows);
    match config.style {
        ListingStyle::Plain => table.with(Style::blank()),
        ListingStyle::Ascii => table.with(Style::ascii()),
        ListingStyle::Markdown => table.with(Style::markdown()),
        ListingStyle::Rounded => table.with(Style::rounded()),
    };
    table.with(Modify::new(Columns::single(1)).with(Width::truncate(config.name_width)));
    table.to_string()
}

/// Print entries to stdout as a three-column table.
pub fn print<'a, I>(entries: I, config: &ListingConfig)
where
    I: IntoIterator<Item = &'a RegistryEntry>,
{
    println!("{}", render(entries, config));
}
