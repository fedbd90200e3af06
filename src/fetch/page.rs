// src/fetch/page.rs
//! Extraction rules for a series page.
//!
//! - Title: first `<h1>`; older layouts use `<h3 class="subj">` instead.
//! - Subscribers: the element right after the one tagged `ico_subscribe`:
//!   `<span class="ico_subscribe">subscribers</span><em class="cnt">1.2M</em>`
//!
//! Counts are shown either in full with separators (`15,234`) or abbreviated
//! in millions (`1.2M`).

use crate::core::html::{self, Tag};
use crate::error::FetchError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedPage {
    pub title: String,
    pub subscribers: i64,
}

pub fn parse_series_page(doc: &str) -> Result<ParsedPage, FetchError> {
    let title = extract_title(doc).ok_or(FetchError::TitleNotFound)?;
    let raw = extract_subscriber_text(doc).ok_or(FetchError::SubscribersNotFound)?;
    let subscribers = parse_subscriber_count(&raw)?;
    Ok(ParsedPage { title, subscribers })
}

fn extract_title(doc: &str) -> Option<String> {
    let is_h1 = |t: &Tag<'_>| t.is("h1");
    let is_subj = |t: &Tag<'_>| t.is("h3") && t.has_class("subj");

    [text_of_first(doc, is_h1), text_of_first(doc, is_subj)]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
}

fn text_of_first<'a>(doc: &'a str, pred: impl Fn(&Tag<'a>) -> bool) -> Option<String> {
    let tag = html::find_element(doc, 0, pred)?;
    html::element_text(doc, &tag)
}

fn extract_subscriber_text(doc: &str) -> Option<String> {
    let icon = html::find_element(doc, 0, |t| t.has_class("ico_subscribe"))?;
    let value = html::next_sibling(doc, &icon)?;
    html::element_text(doc, &value)
}

/// `"15,234"` → 15234, `"1.2M"` → 1200000.
pub fn parse_subscriber_count(text: &str) -> Result<i64, FetchError> {
    let t = text.trim();
    let bad = || FetchError::UnparsableCount(t.to_string());

    if t.contains('M') {
        let number: f64 = t.replace('M', "").trim().parse().map_err(|_| bad())?;
        let scaled = (number * 1_000_000.0).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return Err(bad());
        }
        return Ok(scaled as i64);
    }

    t.replace(',', "").parse::<i64>().map_err(|_| bad())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head><title>ignored</title></head><body>
        <div class="info">
            <h1 class="subj">Tower of
                God</h1>
            <ul class="grade_area">
                <li><span class="ico_view">view</span><em class="cnt">1.5B</em></li>
                <li><span class="ico_subscribe">subscribe</span>
                    <em class="cnt">6.6M</em></li>
            </ul>
        </div>
        </body></html>"#;

    #[test]
    fn parses_live_layout() {
        let p = parse_series_page(PAGE).unwrap();
        assert_eq!(p.title, "Tower of God");
        assert_eq!(p.subscribers, 6_600_000);
    }

    #[test]
    fn falls_back_to_h3_subj() {
        let doc = r#"<h3 class="subj">Lore Olympus</h3>
            <span class="ico_subscribe"></span><em>15,234</em>"#;
        let p = parse_series_page(doc).unwrap();
        assert_eq!(p.title, "Lore Olympus");
        assert_eq!(p.subscribers, 15_234);
    }

    #[test]
    fn h3_without_subj_is_not_a_title() {
        let doc = r#"<h3>Other</h3><span class="ico_subscribe"></span><em>1</em>"#;
        assert!(matches!(parse_series_page(doc), Err(FetchError::TitleNotFound)));
    }

    #[test]
    fn missing_subscriber_block() {
        let doc = "<h1>Alpha</h1><em>100</em>";
        assert!(matches!(parse_series_page(doc), Err(FetchError::SubscribersNotFound)));
    }

    #[test]
    fn loose_angle_brackets_and_scripts_before_title() {
        let doc = "<p>if 1 < 2 isn't true</p><h1>Alpha</h1>\
                   <span class=\"ico_subscribe\"></span><em>100</em>";
        let p = parse_series_page(doc).unwrap();
        assert_eq!(p, ParsedPage { title: s!("Alpha"), subscribers: 100 });

        let doc = r#"<script>if (a<b && c=='x') { t = "<h1>no</h1>"; }</script>
            <h1>Beta</h1><span class="ico_subscribe">subscribe</span> <em>2.5M</em>"#;
        let p = parse_series_page(doc).unwrap();
        assert_eq!(p.title, "Beta");
        assert_eq!(p.subscribers, 2_500_000);
    }

    #[test]
    fn count_formats() {
        assert_eq!(parse_subscriber_count("15,234").unwrap(), 15_234);
        assert_eq!(parse_subscriber_count(" 987 ").unwrap(), 987);
        assert_eq!(parse_subscriber_count("1.2M").unwrap(), 1_200_000);
        assert_eq!(parse_subscriber_count("12M").unwrap(), 12_000_000);
        assert!(matches!(parse_subscriber_count("lots"), Err(FetchError::UnparsableCount(_))));
        assert!(parse_subscriber_count("").is_err());
        assert!(parse_subscriber_count("M").is_err());
    }
}
