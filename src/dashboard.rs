//! Fixed figures for the admin dashboard and analytics pages.
//!
//! These are not derived from the log store and can disagree with the
//! report totals.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardRange {
    #[default]
    Today,
    Week,
    Month,
}

impl DashboardRange {
    pub const OPTIONS: [DashboardRange; 3] =
        [DashboardRange::Today, DashboardRange::Week, DashboardRange::Month];

    pub fn slug(self) -> &'static str {
        match self {
            DashboardRange::Today => "today",
            DashboardRange::Week => "week",
            DashboardRange::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DashboardRange::Today => "Today",
            DashboardRange::Week => "This Week",
            DashboardRange::Month => "This Month",
        }
    }

    pub fn from_slug(slug: &str) -> DashboardRange {
        DashboardRange::OPTIONS
            .into_iter()
            .find(|range| range.slug() == slug)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct StatCard {
    pub label: &'static str,
    pub value: &'static str,
    pub caption: &'static str,
}

#[derive(Debug, Clone)]
pub struct Performer {
    pub rank: usize,
    pub name: &'static str,
    pub initials: String,
    pub figure: String,
}

#[derive(Debug, Clone)]
pub struct RecentLog {
    pub staff: &'static str,
    pub client: &'static str,
    pub services: Vec<&'static str>,
    pub price: &'static str,
    pub date: &'static str,
}

#[derive(Debug, Clone)]
pub struct Bar {
    pub label: &'static str,
    pub value: u32,
    pub percent: u32,
}

#[derive(Debug, Clone)]
pub struct Slice {
    pub label: &'static str,
    pub percent: u32,
    pub color: &'static str,
}

pub fn summary_cards() -> Vec<StatCard> {
    vec![
        StatCard {
            label: "Services Today",
            value: "47",
            caption: "+12% from yesterday",
        },
        StatCard {
            label: "Revenue Today",
            value: "₦425K",
            caption: "+8% from yesterday",
        },
        StatCard {
            label: "Active Staff",
            value: "12",
            caption: "8 currently working",
        },
        StatCard {
            label: "This Month",
            value: "892",
            caption: "Total services",
        },
    ]
}

pub fn top_by_count() -> Vec<Performer> {
    ranked(&[
        ("Ada Okonkwo", "23 services"),
        ("Ruth Ezeh", "21 services"),
        ("Chioma Nwosu", "18 services"),
    ])
}

pub fn top_by_value() -> Vec<Performer> {
    ranked(&[
        ("Ruth Ezeh", "₦185,000"),
        ("Ada Okonkwo", "₦168,000"),
        ("Chioma Nwosu", "₦152,000"),
    ])
}

fn ranked(rows: &[(&'static str, &str)]) -> Vec<Performer> {
    rows.iter()
        .enumerate()
        .map(|(index, &(name, figure))| Performer {
            rank: index + 1,
            name,
            initials: initials(name),
            figure: figure.to_string(),
        })
        .collect()
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

pub fn recent_logs() -> Vec<RecentLog> {
    let rows: [(&str, &str, &[&str], &str, &str); 5] = [
        ("Ada Okonkwo", "Mrs. Johnson", &["Nail Polish", "Pedicure"], "₦12,000", "Oct 22, 2025 2:30 PM"),
        ("Ruth Ezeh", "Sarah Williams", &["Lash Extension"], "₦25,000", "Oct 22, 2025 1:15 PM"),
        ("Chioma Nwosu", "Jessica Brown", &["Facial Treatment", "Massage"], "₦35,000", "Oct 22, 2025 12:45 PM"),
        ("Ada Okonkwo", "Emily Davis", &["Gel Manicure"], "₦15,000", "Oct 22, 2025 11:20 AM"),
        ("Ruth Ezeh", "Jennifer Wilson", &["Waxing - Full Body"], "₦18,000", "Oct 22, 2025 10:30 AM"),
    ];

    rows.into_iter()
        .map(|(staff, client, services, price, date)| RecentLog {
            staff,
            client,
            services: services.to_vec(),
            price,
            date,
        })
        .collect()
}

pub fn services_per_staff() -> Vec<Bar> {
    bars(&[("Ada", 23), ("Ruth", 21), ("Chioma", 18), ("Grace", 15), ("Blessing", 12)])
}

/// Thousands of naira.
pub fn revenue_per_staff() -> Vec<Bar> {
    bars(&[("Ada", 168), ("Ruth", 185), ("Chioma", 152), ("Grace", 128), ("Blessing", 95)])
}

pub fn service_mix() -> Vec<Slice> {
    [
        ("Nail Services", 35, "#f4c7d5"),
        ("Lash Services", 28, "#d4a5d4"),
        ("Waxing", 18, "#c9a27b"),
        ("Facial/Massage", 12, "#a8d5ba"),
        ("Other", 7, "#ffd7ba"),
    ]
    .into_iter()
    .map(|(label, percent, color)| Slice {
        label,
        percent,
        color,
    })
    .collect()
}

/// Scales each value against the largest in the series (largest = 100).
pub fn bars(series: &[(&'static str, u32)]) -> Vec<Bar> {
    let max = series.iter().map(|(_, value)| *value).max().unwrap_or(0);
    series
        .iter()
        .map(|&(label, value)| Bar {
            label,
            value,
            percent: if max == 0 { 0 } else { value * 100 / max },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_series_max() {
        let scaled = bars(&[("a", 50), ("b", 100), ("c", 0)]);
        let percents: Vec<_> = scaled.iter().map(|bar| bar.percent).collect();
        assert_eq!(percents, vec![50, 100, 0]);
        assert!(bars(&[("zero", 0)]).iter().all(|bar| bar.percent == 0));
    }

    #[test]
    fn revenue_chart_peaks_at_ruth() {
        let chart = revenue_per_staff();
        let peak = chart.iter().find(|bar| bar.percent == 100).unwrap();
        assert_eq!(peak.label, "Ruth");
    }

    #[test]
    fn leaderboards_are_ranked_with_initials() {
        let top = top_by_value();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[0].initials, "RE");
        assert_eq!(top[2].name, "Chioma Nwosu");
    }

    #[test]
    fn service_mix_sums_to_hundred() {
        assert_eq!(service_mix().iter().map(|s| s.percent).sum::<u32>(), 100);
    }

    #[test]
    fn range_selector_defaults_to_today() {
        assert_eq!(DashboardRange::from_slug("month"), DashboardRange::Month);
        assert_eq!(DashboardRange::from_slug("year"), DashboardRange::Today);
    }
}
