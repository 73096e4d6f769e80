//! # Output Rendering
//!
//! Turns command responses into terminal text, or into JSON with `--json`.
//!
//! Output goes to stdout; logs go to stderr, so `storefront --json cart show
//! | jq` always sees clean JSON.

use std::fmt::Write as _;

use serde::Serialize;

use storefront_core::{Category, PaginationResult, Product};

use crate::commands::{CartResponse, ProductListResponse};
use crate::error::ApiError;

/// Human-readable rendering of a command response.
pub trait Render {
    fn render_text(&self) -> String;
}

/// Renders `value` as text or pretty JSON.
pub fn render<T>(value: &T, json: bool) -> Result<String, ApiError>
where
    T: Render + Serialize,
{
    if json {
        serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(format!("Failed to encode output: {e}")))
    } else {
        Ok(value.render_text())
    }
}

// =============================================================================
// Page Strip
// =============================================================================

/// One entry in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(u32),
    Ellipsis,
}

/// Page numbers to show around `current`.
///
/// First page (and a gap) once the current page is past 3, the current page
/// and its neighbours, then a gap and the last page while the current page
/// is more than 2 from the end. Empty when there is at most one page.
pub fn page_numbers(current: u32, total: u32) -> Vec<PageLink> {
    if total <= 1 {
        return Vec::new();
    }

    let mut links = Vec::new();

    if current > 3 {
        links.push(PageLink::Page(1));
        if current > 4 {
            links.push(PageLink::Ellipsis);
        }
    }

    let first = current.saturating_sub(1).max(1);
    let last = current.saturating_add(1).min(total);
    links.extend((first..=last).map(PageLink::Page));

    if current.saturating_add(2) < total {
        if current.saturating_add(3) < total {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Page(total));
    }

    links
}

fn render_pager(out: &mut String, pagination: &PaginationResult) {
    let links = page_numbers(pagination.current_page, pagination.total_pages);
    if links.is_empty() {
        return;
    }

    let strip: Vec<String> = links
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == pagination.current_page => format!("[{n}]"),
            PageLink::Page(n) => n.to_string(),
            PageLink::Ellipsis => "...".to_string(),
        })
        .collect();

    let prev = if pagination.has_previous() { "<" } else { " " };
    let next = if pagination.has_next() { ">" } else { " " };
    let _ = writeln!(out, "\n{prev} {} {next}", strip.join(" "));
}

// =============================================================================
// Implementations
// =============================================================================

impl Render for CartResponse {
    fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Your Cart ({} items)", self.totals.total_items);

        if self.items.is_empty() {
            let _ = writeln!(out, "\nYour cart is empty");
            let _ = writeln!(out, "Start adding some products to your cart");
            return out;
        }

        out.push('\n');
        for item in &self.items {
            let _ = writeln!(
                out,
                "  #{:<5} {:<40} {} × {}",
                item.id(),
                item.product.title,
                item.unit_price(),
                item.quantity
            );
        }

        let _ = writeln!(out, "\n  Total {:>48}", self.totals.total_price.to_string());
        out
    }
}

impl Render for ProductListResponse {
    fn render_text(&self) -> String {
        let mut out = String::new();

        match &self.query {
            Some(query) => {
                let _ = writeln!(out, "Results for \"{query}\" ({} found)", self.total_items);
            }
            None => {
                let _ = writeln!(out, "Products ({} total)", self.total_items);
            }
        }

        if self.products.is_empty() {
            let _ = writeln!(out, "\nNo products found");
        } else {
            out.push('\n');
            for product in &self.products {
                let _ = writeln!(
                    out,
                    "  #{:<5} {:<40} {:>10}",
                    product.id,
                    product.title,
                    product.unit_price().to_string()
                );
            }
        }

        let pagination = &self.pagination;
        if pagination.total_pages > 0 {
            let _ = writeln!(
                out,
                "\nPage {} of {}",
                pagination.current_page, pagination.total_pages
            );
        }
        render_pager(&mut out, pagination);

        out
    }
}

impl Render for Product {
    fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} (#{})", self.title, self.id);
        let _ = writeln!(out, "{}", self.unit_price());
        let _ = writeln!(out, "Category: {}", self.category.name);

        if !self.description.is_empty() {
            let _ = writeln!(out, "\n{}", self.description);
        }
        if let Some(image) = self.thumbnail() {
            let _ = writeln!(out, "\nImage: {image}");
        }

        out
    }
}

impl Render for Vec<Category> {
    fn render_text(&self) -> String {
        if self.is_empty() {
            return "No categories\n".to_string();
        }

        let mut out = String::new();
        for category in self {
            let _ = writeln!(out, "  #{:<5} {}", category.id, category.name);
        }
        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
