use crate::GhcalError;
use crate::markup::{Tag, Token, Tokenizer};

/// Class marker carried by the per-year anchors of the contributions tab.
pub const YEAR_LINK_CLASS: &str = "js-year-link";

fn is_year_link(tag: &Tag) -> bool {
    tag.is("a")
        && tag
            .attr("class")
            .is_some_and(|class| class.contains(YEAR_LINK_CLASS))
}

/// Extract the years with recorded activity from the contributions tab.
///
/// Each `<a>` whose class contains [`YEAR_LINK_CLASS`] is followed by its
/// text; text that does not parse as a year is skipped. Order follows the
/// document and duplicates are kept.
///
/// # Errors
/// Returns `GhcalError::Parse` only if the markup cannot be tokenized.
pub fn parse_years_page(page: &[u8]) -> Result<Vec<i32>, GhcalError> {
    let mut tokens = Tokenizer::new(page);
    let mut years = Vec::new();

    while let Some(token) = tokens.next() {
        let Token::Start(tag) = token? else {
            continue;
        };
        if !is_year_link(&tag) {
            continue;
        }
        let Some(text) = tokens.next_text()? else {
            continue;
        };
        match text.trim().parse::<i32>() {
            Ok(year) => years.push(year),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(text = %text.trim(), error = %_e, "skipping unparseable year link");
            }
        }
    }

    Ok(years)
}
