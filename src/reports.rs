use chrono::{Days, NaiveDate};

use crate::{models::LogEntry, notify::Notifier};

pub const ALL: &str = "all";
pub const CURRENCY: char = '₦';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateBucket {
    #[default]
    All,
    Today,
    Yesterday,
    Week,
    Month,
}

impl DateBucket {
    pub const OPTIONS: [DateBucket; 5] = [
        DateBucket::All,
        DateBucket::Today,
        DateBucket::Yesterday,
        DateBucket::Week,
        DateBucket::Month,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            DateBucket::All => ALL,
            DateBucket::Today => "today",
            DateBucket::Yesterday => "yesterday",
            DateBucket::Week => "week",
            DateBucket::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateBucket::All => "All Time",
            DateBucket::Today => "Today",
            DateBucket::Yesterday => "Yesterday",
            DateBucket::Week => "This Week",
            DateBucket::Month => "This Month",
        }
    }

    pub fn from_slug(slug: &str) -> DateBucket {
        DateBucket::OPTIONS
            .into_iter()
            .find(|bucket| bucket.slug() == slug)
            .unwrap_or_default()
    }
}

/// Selectable, but not wired to any filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServiceCategory {
    #[default]
    All,
    Nail,
    Lash,
    Waxing,
    Facial,
}

impl ServiceCategory {
    pub const OPTIONS: [ServiceCategory; 5] = [
        ServiceCategory::All,
        ServiceCategory::Nail,
        ServiceCategory::Lash,
        ServiceCategory::Waxing,
        ServiceCategory::Facial,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ServiceCategory::All => ALL,
            ServiceCategory::Nail => "nail",
            ServiceCategory::Lash => "lash",
            ServiceCategory::Waxing => "waxing",
            ServiceCategory::Facial => "facial",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::All => "All Services",
            ServiceCategory::Nail => "Nail Services",
            ServiceCategory::Lash => "Lash Services",
            ServiceCategory::Waxing => "Waxing",
            ServiceCategory::Facial => "Facial/Massage",
        }
    }

    pub fn from_slug(slug: &str) -> ServiceCategory {
        ServiceCategory::OPTIONS
            .into_iter()
            .find(|category| category.slug() == slug)
            .unwrap_or_default()
    }
}

/// Date labels the report buckets compare against, e.g. "Oct 22, 2025".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCalendar {
    pub today: String,
    pub yesterday: String,
}

impl ReportCalendar {
    pub fn new(today: NaiveDate) -> Self {
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        Self {
            today: date_label(today),
            yesterday: date_label(yesterday),
        }
    }
}

pub fn date_label(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilters {
    /// `None` means all staff.
    pub staff: Option<String>,
    pub date: DateBucket,
    pub category: ServiceCategory,
}

impl LogFilters {
    pub fn from_selection(staff: &str, date: &str, category: &str) -> Self {
        let staff = staff.trim();
        Self {
            staff: (!staff.is_empty() && staff != ALL).then(|| staff.to_string()),
            date: DateBucket::from_slug(date.trim()),
            category: ServiceCategory::from_slug(category.trim()),
        }
    }

    pub fn staff_slug(&self) -> &str {
        self.staff.as_deref().unwrap_or(ALL)
    }

    /// Week and month buckets are accepted but match everything, as does
    /// the category.
    pub fn matches(&self, calendar: &ReportCalendar, entry: &LogEntry) -> bool {
        if let Some(staff) = &self.staff {
            if entry.staff != *staff {
                return false;
            }
        }
        match self.date {
            DateBucket::Today => entry.date == calendar.today,
            DateBucket::Yesterday => entry.date == calendar.yesterday,
            DateBucket::All | DateBucket::Week | DateBucket::Month => true,
        }
    }
}

pub fn filter_logs<'a>(
    entries: &'a [LogEntry],
    filters: &LogFilters,
    calendar: &ReportCalendar,
) -> Vec<&'a LogEntry> {
    entries
        .iter()
        .filter(|entry| filters.matches(calendar, entry))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub count: usize,
    pub revenue: u64,
}

/// A total that does not parse, or that would overflow the running sum, adds
/// nothing to revenue.
pub fn summarize(entries: &[&LogEntry]) -> ReportSummary {
    let mut revenue: u64 = 0;
    for entry in entries {
        let Some(amount) = parse_price(&entry.total) else {
            log::warn!("Unreadable total {:?} on log entry {}", entry.total, entry.id);
            continue;
        };
        match revenue.checked_add(amount) {
            Some(sum) => revenue = sum,
            None => log::warn!(
                "Total {:?} on log entry {} overflows revenue; not counted",
                entry.total,
                entry.id
            ),
        }
    }

    ReportSummary {
        count: entries.len(),
        revenue,
    }
}

/// Reads "₦18,000" as 18000. Anything other than digits after stripping the
/// currency sign and separators is rejected.
pub fn parse_price(text: &str) -> Option<u64> {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| *c != CURRENCY && *c != ',')
        .collect();
    let digits = digits.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// 143000 -> "₦143,000".
pub fn format_naira(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{CURRENCY}{grouped}")
}

/// Acknowledges the request only; no file is produced.
pub fn export_csv(notifier: &mut impl Notifier) {
    notifier.success(
        "CSV export initiated",
        Some("Your report will download shortly".to_string()),
    );
}
