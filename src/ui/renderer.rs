//! Plain-text rendering of a [`CatalogViewModel`].
//!
//! The renderer is deliberately dumb: every decision about what to show has
//! already been made by [`compute_viewmodel`](super::compute_viewmodel). It only
//! lays the pieces out, one card per block, and marks search matches with
//! `*...*`.
//!
//! # Layout
//!
//! ```text
//! Medicines (6)                     ← header
//! Search: amox (1 of 6)             ← search bar, when searching
//! Refresh failed: NetworkError      ← status line, when not ready
//!
//! [1] *Amox*icillin  $199.99  ★ 4.9 ← card
//!     Used to treat infections...
//!
//! Updated 5m ago                    ← freshness
//! ```

use crate::ui::helpers::mark_ranges;
use crate::ui::viewmodel::{CatalogViewModel, ListStatus, MedicineCard};
use std::io::{self, Write};

const MATCH_OPEN: &str = "*";
const MATCH_CLOSE: &str = "*";

/// Writes the view model to `out`.
///
/// # Errors
///
/// Propagates any write error from `out`.
pub fn render(vm: &CatalogViewModel, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", vm.header.title)?;

    if let Some(search) = &vm.search_bar {
        writeln!(out, "Search: {} ({})", search.query, search.match_count)?;
    }

    render_status(&vm.status, out)?;

    if let Some(empty) = &vm.empty_state {
        writeln!(out)?;
        writeln!(out, "  {}", empty.message)?;
        writeln!(out, "  {}", empty.subtitle)?;
    }

    for card in &vm.cards {
        writeln!(out)?;
        render_card(card, out)?;
    }

    if let Some(updated) = &vm.updated {
        writeln!(out)?;
        writeln!(out, "{updated}")?;
    }

    Ok(())
}

fn render_status(status: &ListStatus, out: &mut impl Write) -> io::Result<()> {
    match status {
        ListStatus::Ready => Ok(()),
        ListStatus::Loading { message } => writeln!(out, "{message}"),
        ListStatus::Refreshing => writeln!(out, "Refreshing..."),
        ListStatus::Stale { banner } => writeln!(out, "{banner}"),
        ListStatus::Failed {
            title,
            detail,
            retry_label,
        } => {
            writeln!(out, "{title}")?;
            writeln!(out, "  {detail}")?;
            writeln!(out, "  [{retry_label}]")
        }
    }
}

fn render_card(card: &MedicineCard, out: &mut impl Write) -> io::Result<()> {
    let name = mark_ranges(&card.name, &card.name_highlights, MATCH_OPEN, MATCH_CLOSE);
    write!(out, "[{}] {name}", card.id)?;
    if !card.price.is_empty() {
        write!(out, "  {}", card.price)?;
    }
    writeln!(out, "  {}", card.rating)?;

    if !card.description.is_empty() {
        let description = mark_ranges(
            &card.description,
            &card.description_highlights,
            MATCH_OPEN,
            MATCH_CLOSE,
        );
        writeln!(out, "    {description}")?;
    }
    Ok(())
}
