//! Presentation seam for the token listing.

use crate::console::display::TokenRow;
use crate::console::pagination::PageLink;

/// Receives the replaced row set and pagination strip after each applied
/// load. Implementations must not retain stale rows across calls.
pub trait ListView: Send {
    fn render_rows(&mut self, rows: &[TokenRow]);
    fn render_pagination(&mut self, links: &[PageLink]);
}

/// Plain-text table renderer for the CLI.
pub struct TableView;

impl ListView for TableView {
    fn render_rows(&mut self, rows: &[TokenRow]) {
        if rows.is_empty() {
            println!("(no tokens)");
            return;
        }
        println!(
            "{:>5}  {:>6}  {:<43}  {:<19}  {}",
            "#", "id", "token", "expires", "status"
        );
        for row in rows {
            println!(
                "{:>5}  {:>6}  {:<43}  {:<19}  {}",
                row.ordinal, row.id, row.display, row.expires, row.badge
            );
        }
    }

    fn render_pagination(&mut self, links: &[PageLink]) {
        if links.is_empty() {
            return;
        }
        let parts: Vec<String> = links
            .iter()
            .map(|link| match link {
                PageLink::Prev { disabled: true, .. } => "prev".to_string(),
                PageLink::Prev { target, .. } => format!("<prev({target})"),
                PageLink::Number {
                    page,
                    current: true,
                } => format!("[{page}]"),
                PageLink::Number { page, .. } => page.to_string(),
                PageLink::Next { disabled: true, .. } => "next".to_string(),
                PageLink::Next { target, .. } => format!("next({target})>"),
                PageLink::Total { count } => format!("({count} total)"),
            })
            .collect();
        println!("{}", parts.join(" "));
    }
}
