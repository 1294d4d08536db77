//! CSS selectors for the ASN directory listing pages.
//!
//! Update this file when the site changes its table or pagination markup,
//! and add a fixture covering the new structure.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the ASN table.
pub mod listing {
    use super::*;

    /// ASN links inside table cells, e.g. `<td class="table-cell"><a href="/AS4134">AS4134</a></td>`.
    pub static ASN_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(r#"td.table-cell a[href^="/AS"]"#).unwrap());
}

/// Selectors for the pagination bar.
pub mod pagination {
    use super::*;

    /// Text spans, one of which carries the total record label.
    pub static SPAN: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".pagination span").unwrap());

    /// Pagination links that are not disabled.
    pub static ENABLED_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".pagination a:not([disabled])").unwrap());
}
