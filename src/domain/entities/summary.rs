//! Aggregate figures over a link collection.

use super::Link;

/// Dashboard totals for a set of links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSummary {
    pub count: usize,
    pub total_clicks: u64,
    /// Mean clicks per link, rounded to the nearest integer. Zero when empty.
    pub avg_clicks: u64,
}

impl LinkSummary {
    /// Computes totals for `links`.
    pub fn of(links: &[Link]) -> Self {
        let count = links.len();
        let total_clicks: u64 = links.iter().map(|l| l.total_clicks).sum();

        let avg_clicks = if count == 0 {
            0
        } else {
            let count = count as u64;
            (total_clicks + count / 2) / count
        };

        Self {
            count,
            total_clicks,
            avg_clicks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn link_with_clicks(code: &str, clicks: u64) -> Link {
        let mut link = Link::new(code, "https://example.com", Utc::now());
        link.total_clicks = clicks;
        link
    }

    #[test]
    fn test_empty_summary_has_no_division() {
        assert_eq!(
            LinkSummary::of(&[]),
            LinkSummary {
                count: 0,
                total_clicks: 0,
                avg_clicks: 0
            }
        );
    }

    #[test]
    fn test_summary_totals() {
        let links = vec![link_with_clicks("aaaaaa", 5), link_with_clicks("bbbbbb", 10)];
        let summary = LinkSummary::of(&links);

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_clicks, 15);
        // 7.5 rounds up
        assert_eq!(summary.avg_clicks, 8);
    }

    #[test]
    fn test_summary_rounds_down_below_half() {
        let links = vec![
            link_with_clicks("aaaaaa", 1),
            link_with_clicks("bbbbbb", 1),
            link_with_clicks("cccccc", 2),
        ];
        assert_eq!(LinkSummary::of(&links).avg_clicks, 1);
    }
}
