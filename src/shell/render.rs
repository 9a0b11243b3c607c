//! Plain-text rendering of screen states.

use std::fmt::Write;

use crate::data::Item;
use crate::ui::details::{DetailsStatus, ItemDetailsUiState};
use crate::ui::home::HomeUiState;
use crate::ui::search::SearchUiState;

fn item_row(out: &mut String, item: &Item) {
    let _ = writeln!(
        out,
        "  #{:<4} {:<24} {:>10}  qty {}",
        item.id,
        item.name,
        item.formatted_price(),
        item.quantity
    );
}

pub fn home(state: &HomeUiState) -> String {
    let mut out = String::from("== Inventory ==\n");
    if state.is_filtered() {
        let _ = writeln!(out, "search: {:?}", state.query);
    }
    if state.item_list.is_empty() {
        let message = if state.snapshot().is_empty() {
            "No items in inventory. Use 'add' to create one."
        } else {
            "No items match the search."
        };
        let _ = writeln!(out, "{}", message);
    }
    for item in &state.item_list {
        item_row(&mut out, item);
    }
    out
}

pub fn details(state: &ItemDetailsUiState) -> String {
    let mut out = String::from("== Item Details ==\n");
    match state.status {
        DetailsStatus::Loading => out.push_str("Loading...\n"),
        DetailsStatus::NotFound => out.push_str("Item not found.\n"),
        DetailsStatus::Ready => {
            let item = &state.item_details;
            let _ = writeln!(out, "name:     {}", item.name);
            let _ = writeln!(out, "price:    {}", item.to_item().formatted_price());
            let _ = writeln!(out, "quantity: {}", item.quantity);
            if state.out_of_stock {
                out.push_str("OUT OF STOCK\n");
            }
        }
    }
    if !state.item_id.is_empty() {
        let _ = writeln!(out, "entered id: {}", state.item_id);
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "error: {}", error);
    }
    out
}

pub fn search(state: &SearchUiState) -> String {
    let mut out = String::from("== Search ==\n");
    let _ = writeln!(out, "text: {:?}", state.search_text);
    for item in &state.results {
        let _ = writeln!(out, "  ID: {}, Name: {}", item.id, item.name);
    }
    if state.results.is_empty() {
        out.push_str("No results.\n");
    }
    out
}
