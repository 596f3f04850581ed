use crate::page_rank::RankEstimate;
use std::fmt::Write;

/// Renders `ranks` under `title`, one `  <page>: <rank>` line per page in
/// id order, each rank with `precision` decimals.
pub fn render(title: &str, ranks: &RankEstimate, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    for (page, rank) in ranks.iter() {
        let _ = writeln!(out, "  {page}: {rank:.precision$}");
    }
    out
}
