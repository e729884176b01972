//! Structured extraction from bill page markup.
//!
//! Missing optional sections (main text, vote breakdown, status timeline)
//! degrade to the sentinel body or an empty result. Values that are present
//! but malformed, such as an unparseable date, are hard errors since they
//! point at a change in the page layout.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

use legiscan_core::types::{BillRecord, TimelineEvent, VoteCategory, VoteTally};

use crate::error::ScrapeError;

/// Parents whose text children are never visible content.
const HIDDEN_PARENTS: [&str; 5] = ["style", "script", "[document]", "head", "title"];

/// Date layout used on status timeline entries, e.g. `Jan 05, 2021`.
const TIMELINE_DATE_FORMAT: &str = "%b %d, %Y";

const TITLE: &str = "h1";
const MAIN_TEXT: &str = "div#main_text_content";
const VOTE_BREAKDOWN: &str = "div.vote-breakdown";
const VOTE_COUNT: &str = "span.count";
const TIMELINE: &str = "ol.bill_status_timeline";
const TIMELINE_ITEM: &str = "li";
const TIMELINE_DATE: &str = "span.date";
const TIMELINE_TEXT: &str = "span.text";

/// Everything the pipeline needs from one page.
#[derive(Debug, Clone)]
pub struct ExtractedBill {
    pub record: BillRecord,
    pub votes: VoteTally,
    pub timeline: Vec<TimelineEvent>,
}

/// A parsed bill page.
///
/// `Html` is not `Send`, so keep a `BillPage` out of any `.await` span and
/// hand the extracted values onward instead.
pub struct BillPage {
    html: Html,
}

impl BillPage {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Title from the first `h1` and the visible text of the main container.
    pub fn record(&self) -> Result<BillRecord, ScrapeError> {
        let title = self
            .html
            .select(&selector(TITLE)?)
            .next()
            .map(element_text)
            .ok_or(ScrapeError::MissingTitle)?;

        let full_text = match self.html.select(&selector(MAIN_TEXT)?).next() {
            Some(container) => Some(visible_text(container)),
            None => {
                warn!(title = %title, "Bill page has no main text container");
                None
            }
        };

        Ok(BillRecord::new(title, full_text))
    }

    /// Vote counts for whichever categories the breakdown lists.
    pub fn votes(&self) -> Result<VoteTally, ScrapeError> {
        let mut tally = VoteTally::new();

        let Some(breakdown) = self.html.select(&selector(VOTE_BREAKDOWN)?).next() else {
            debug!("Bill page has no vote breakdown");
            return Ok(tally);
        };

        let count_selector = selector(VOTE_COUNT)?;
        for category in VoteCategory::ALL {
            let category_selector = selector(&format!("div.vote-{}", category.slug()))?;
            let count = breakdown
                .select(&category_selector)
                .next()
                .and_then(|block| block.select(&count_selector).next());

            let Some(count) = count else {
                continue;
            };

            let raw = element_text(count);
            let value = raw
                .parse::<u64>()
                .map_err(|_| ScrapeError::InvalidCount {
                    category,
                    value: raw.clone(),
                })?;
            tally.insert(category, value);
        }

        Ok(tally)
    }

    /// Status milestones in page order.
    pub fn timeline(&self) -> Result<Vec<TimelineEvent>, ScrapeError> {
        let Some(list) = self.html.select(&selector(TIMELINE)?).next() else {
            debug!("Bill page has no status timeline");
            return Ok(Vec::new());
        };

        let item_selector = selector(TIMELINE_ITEM)?;
        let date_selector = selector(TIMELINE_DATE)?;
        let text_selector = selector(TIMELINE_TEXT)?;

        list.select(&item_selector)
            .map(|item| -> Result<TimelineEvent, ScrapeError> {
                let date = item
                    .select(&date_selector)
                    .next()
                    .map(element_text)
                    .ok_or_else(|| ScrapeError::MalformedTimeline("entry has no date".into()))?;
                let event = item
                    .select(&text_selector)
                    .next()
                    .map(element_text)
                    .ok_or_else(|| {
                        ScrapeError::MalformedTimeline(format!("entry dated '{}' has no text", date))
                    })?;
                Ok(TimelineEvent::new(event, parse_timeline_date(&date)?))
            })
            .collect()
    }
}

/// Extract the title and body.
pub fn extract(markup: &str) -> Result<BillRecord, ScrapeError> {
    BillPage::parse(markup).record()
}

/// Extract the vote breakdown; empty when the page has none.
pub fn extract_votes(markup: &str) -> Result<VoteTally, ScrapeError> {
    BillPage::parse(markup).votes()
}

/// Extract the status timeline; empty when the page has none.
pub fn extract_timeline(markup: &str) -> Result<Vec<TimelineEvent>, ScrapeError> {
    BillPage::parse(markup).timeline()
}

/// Parse once and extract record, votes and timeline.
pub fn extract_all(markup: &str) -> Result<ExtractedBill, ScrapeError> {
    let page = BillPage::parse(markup);
    Ok(ExtractedBill {
        record: page.record()?,
        votes: page.votes()?,
        timeline: page.timeline()?,
    })
}

/// Parse a `Mon DD, YYYY` timeline date.
pub fn parse_timeline_date(raw: &str) -> Result<NaiveDate, ScrapeError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, TIMELINE_DATE_FORMAT)
        .map_err(|_| ScrapeError::DateParse(raw.to_string()))
}

/// Normalize a `Mon DD, YYYY` date to `YYYY-MM-DD`.
pub fn normalize_timeline_date(raw: &str) -> Result<String, ScrapeError> {
    parse_timeline_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Visible text nodes under `container`, trimmed, joined by newlines.
fn visible_text(container: ElementRef<'_>) -> String {
    container
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent().map(|p| match p.value() {
                Node::Element(e) => e.name(),
                Node::Document => "[document]",
                _ => "",
            });
            if parent.is_some_and(|name| HIDDEN_PARENTS.contains(&name)) {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
