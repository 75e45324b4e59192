//! Fixed Russian strings used in reports.

use chrono::{Datelike, Timelike};

use crate::model::ReportKind;

pub const WEEKDAYS: [&str; 7] = [
    "Понедельник",
    "Вторник",
    "Среда",
    "Четверг",
    "Пятница",
    "Суббота",
    "Воскресенье",
];

/// Genitive month names ("15 октября").
pub const MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

pub const APOLOGY: &str = "⚠️ Не удалось получить данные о погоде. Попробуйте позже.";

pub const MORNING_CLOSING: &str = "Хорошего дня! 👋";
pub const ON_DEMAND_CLOSING: &str = "Данные обновлены по запросу 🔄";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Greeting {
    /// The scheduled send always greets the morning; replies follow the clock.
    pub fn select(kind: ReportKind, hour: u32) -> Self {
        if kind == ReportKind::Morning {
            return Greeting::Morning;
        }
        match hour {
            0..=11 => Greeting::Morning,
            12..=17 => Greeting::Afternoon,
            18..=22 => Greeting::Evening,
            _ => Greeting::Night,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Greeting::Morning => "🌅 Доброе утро!",
            Greeting::Afternoon => "☀️ Добрый день!",
            Greeting::Evening => "🌆 Добрый вечер!",
            Greeting::Night => "🌙 Доброй ночи!",
        }
    }
}

pub fn closing(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Morning => MORNING_CLOSING,
        ReportKind::OnDemand => ON_DEMAND_CLOSING,
    }
}

/// "Четверг, 15 октября 2026"
pub fn date_line<T: Datelike>(date: &T) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize];
    format!("{weekday}, {} {month} {}", date.day(), date.year())
}

pub fn clock<T: Timelike>(time: &T) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
