//! Locale tables: weekday names, day-kind labels, greetings and the
//! category names the reports treat specially.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Time-of-day band used to pick a greeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    /// 05-11 morning, 12-16 afternoon, 17-22 evening, otherwise night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPart::Morning,
            12..=16 => DayPart::Afternoon,
            17..=22 => DayPart::Evening,
            _ => DayPart::Night,
        }
    }
}

/// Workday (Mon-Fri) or weekend (Sat-Sun)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayKind {
    Workday,
    Weekend,
}

impl DayKind {
    pub fn of(weekday: Weekday) -> Self {
        if weekday.num_days_from_monday() >= 5 {
            DayKind::Weekend
        } else {
            DayKind::Workday
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Monday first
    pub weekdays: [&'static str; 7],
    pub workday: &'static str,
    pub weekend: &'static str,
    pub morning: &'static str,
    pub afternoon: &'static str,
    pub evening: &'static str,
    pub night: &'static str,
    /// Label of the bucket collecting categories beyond the top ones
    pub other: &'static str,
    /// Category of person-to-person transfers
    pub transfers_category: &'static str,
    /// Category of cash withdrawals
    pub cash_category: &'static str,
}

impl Locale {
    /// Matches the category names of the statement export.
    pub fn russian() -> Self {
        Self {
            weekdays: [
                "Понедельник",
                "Вторник",
                "Среда",
                "Четверг",
                "Пятница",
                "Суббота",
                "Воскресенье",
            ],
            workday: "Рабочий",
            weekend: "Выходной",
            morning: "Доброе утро",
            afternoon: "Добрый день",
            evening: "Добрый вечер",
            night: "Доброй ночи",
            other: "Остальное",
            transfers_category: "Переводы",
            cash_category: "Наличные",
        }
    }

    pub fn english() -> Self {
        Self {
            weekdays: [
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ],
            workday: "Workday",
            weekend: "Weekend",
            morning: "Good morning",
            afternoon: "Good afternoon",
            evening: "Good evening",
            night: "Good night",
            other: "Other",
            transfers_category: "Transfers",
            cash_category: "Cash",
        }
    }

    /// Look up a locale by language code ("ru", "en").
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ru" | "russian" => Some(Self::russian()),
            "en" | "english" => Some(Self::english()),
            _ => None,
        }
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &'static str {
        self.weekdays[weekday.num_days_from_monday() as usize]
    }

    pub fn day_kind_name(&self, kind: DayKind) -> &'static str {
        match kind {
            DayKind::Workday => self.workday,
            DayKind::Weekend => self.weekend,
        }
    }

    pub fn greeting(&self, hour: u32) -> &'static str {
        match DayPart::from_hour(hour) {
            DayPart::Morning => self.morning,
            DayPart::Afternoon => self.afternoon,
            DayPart::Evening => self.evening,
            DayPart::Night => self.night,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::russian()
    }
}
