use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::{ServiceError, ServiceResult};

pub const SLOT_FMT: &str = "%H:%M";

/// Accepts "HH:MM" and MySQL's "HH:MM:SS".
pub fn parse_clock(s: &str) -> ServiceResult<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| ServiceError::validation(format!("Horário inválido: {:?}", s)))
}

pub fn format_clock(time: &NaiveTime) -> String {
    time.format(SLOT_FMT).to_string()
}

/// Candidate slots for one workshop day.
///
/// Slots start at `open` and advance by `interval_minutes` while the slot is
/// strictly before `close`; the closing time itself is never offered.
/// Booked slots are skipped, and so is everything not after `now` when `date`
/// is today. A past `date` has no slots.
pub fn generate_slots(
    open: &str,
    close: &str,
    interval_minutes: u32,
    booked: &[NaiveTime],
    date: NaiveDate,
    now: NaiveDateTime,
) -> ServiceResult<Vec<NaiveTime>> {
    if interval_minutes == 0 {
        return Err(ServiceError::validation("Intervalo entre horários deve ser positivo"));
    }
    let open = parse_clock(open)?;
    let close = parse_clock(close)?;

    let today = now.date();
    if date < today {
        return Ok(Vec::new());
    }

    let step = Duration::minutes(i64::from(interval_minutes));
    let mut slots = Vec::new();
    let mut current = open;
    while current < close {
        let taken = booked.contains(&current);
        let passed = date == today && current <= now.time();
        if !taken && !passed {
            slots.push(current);
        }

        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        current = next;
    }
    Ok(slots)
}

pub fn format_slots(slots: &[NaiveTime]) -> Vec<String> {
    slots.iter().map(format_clock).collect()
}

const DAY_NAMES: [(&str, Weekday); 7] = [
    ("seg", Weekday::Mon),
    ("ter", Weekday::Tue),
    ("qua", Weekday::Wed),
    ("qui", Weekday::Thu),
    ("sex", Weekday::Fri),
    ("sab", Weekday::Sat),
    ("dom", Weekday::Sun),
];

fn parse_day(word: &str) -> Option<Weekday> {
    let word: String = word
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == 'á' { 'a' } else { c })
        .take(3)
        .collect();
    DAY_NAMES
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, day)| *day)
}

/// Expands "seg-sex", "Segunda-feira a Sexta-feira", "ter, qui e sab" into
/// weekdays. Hour notes such as "8h-18h" are ignored. `None` when the text
/// isn't recognised.
pub fn parse_operating_days(text: &str) -> Option<Vec<Weekday>> {
    let text = text.to_lowercase().replace("-feira", "").replace(" e ", ",");
    let mut days = Vec::new();
    for part in text.split(|c| c == ',' || c == ';' || c == '/') {
        let part = part
            .split_whitespace()
            .filter(|word| !word.chars().any(|c| c.is_ascii_digit()))
            .collect::<Vec<_>>()
            .join(" ");
        if part.is_empty() {
            continue;
        }
        let bounds: Vec<&str> = [" a ", " à ", " até "]
            .iter()
            .find(|sep| part.contains(*sep))
            .map(|sep| part.split(*sep).collect())
            .unwrap_or_else(|| part.split('-').collect());

        match bounds.as_slice() {
            [single] => days.push(parse_day(single)?),
            [from, to] => {
                let mut day = parse_day(from)?;
                let to = parse_day(to)?;
                days.push(day);
                while day != to {
                    day = day.succ();
                    days.push(day);
                }
            }
            _ => return None,
        }
    }
    if days.is_empty() {
        None
    } else {
        Some(days)
    }
}

/// Unrecognised or empty text means the workshop didn't restrict its days.
pub fn is_open_on(operating_days: &str, date: NaiveDate) -> bool {
    match parse_operating_days(operating_days) {
        Some(days) => days.contains(&date.weekday()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        parse_clock(s).unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd(2026, 3, 10).and_hms(10, 30, 0)
    }

    fn tomorrow() -> NaiveDate {
        NaiveDate::from_ymd(2026, 3, 11)
    }

    #[test]
    fn closing_time_is_exclusive() {
        let slots = generate_slots("08:00", "12:00", 60, &[], tomorrow(), now()).unwrap();
        assert_eq!(format_slots(&slots), vec!["08:00", "09:00", "10:00", "11:00"]);
    }

    #[test]
    fn booked_slot_is_excluded() {
        let slots = generate_slots("08:00", "12:00", 60, &[t("09:00")], tomorrow(), now()).unwrap();
        assert_eq!(format_slots(&slots), vec!["08:00", "10:00", "11:00"]);
    }

    #[test]
    fn uneven_interval_keeps_last_slot_before_close() {
        let slots = generate_slots("08:00", "09:00", 25, &[], tomorrow(), now()).unwrap();
        assert_eq!(format_slots(&slots), vec!["08:00", "08:25", "08:50"]);
    }

    #[test]
    fn today_drops_past_slots() {
        let today = now().date();
        let slots = generate_slots("08:00", "13:00", 60, &[], today, now()).unwrap();
        assert_eq!(format_slots(&slots), vec!["11:00", "12:00"]);
    }

    #[test]
    fn slot_at_exactly_now_is_gone() {
        let now = NaiveDate::from_ymd(2026, 3, 10).and_hms(11, 0, 0);
        let slots = generate_slots("08:00", "13:00", 60, &[], now.date(), now).unwrap();
        assert_eq!(format_slots(&slots), vec!["12:00"]);
    }

    #[test]
    fn past_date_has_no_slots() {
        let yesterday = NaiveDate::from_ymd(2026, 3, 9);
        assert!(generate_slots("08:00", "18:00", 60, &[], yesterday, now())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn mysql_time_strings_are_accepted() {
        let slots = generate_slots("08:00:00", "10:00:00", 30, &[], tomorrow(), now()).unwrap();
        assert_eq!(format_slots(&slots), vec!["08:00", "08:30", "09:00", "09:30"]);
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(generate_slots("08:00", "12:00", 0, &[], tomorrow(), now()).is_err());
    }

    #[test]
    fn inverted_hours_have_no_slots() {
        assert!(generate_slots("18:00", "08:00", 60, &[], tomorrow(), now())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn late_close_does_not_wrap_past_midnight() {
        let slots = generate_slots("22:00", "23:59", 60, &[], tomorrow(), now()).unwrap();
        assert_eq!(format_slots(&slots), vec!["22:00", "23:00"]);
    }

    #[test]
    fn garbage_hours_are_rejected() {
        assert!(generate_slots("oito", "12:00", 60, &[], tomorrow(), now()).is_err());
    }

    #[test]
    fn operating_day_ranges() {
        assert_eq!(
            parse_operating_days("Seg-Sex").unwrap(),
            vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
        );
        assert_eq!(
            parse_operating_days("segunda a sábado").unwrap().len(),
            6
        );
        assert_eq!(
            parse_operating_days("ter, qui, sab").unwrap(),
            vec![Weekday::Tue, Weekday::Thu, Weekday::Sat]
        );
    }

    #[test]
    fn wrapping_range() {
        assert_eq!(
            parse_operating_days("sex-seg").unwrap(),
            vec![Weekday::Fri, Weekday::Sat, Weekday::Sun, Weekday::Mon]
        );
    }

    #[test]
    fn full_weekday_names_and_hour_notes() {
        let weekdays = vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
        assert_eq!(parse_operating_days("Segunda-feira a Sexta-feira").unwrap(), weekdays);
        assert_eq!(parse_operating_days("seg a sex 8h-18h").unwrap(), weekdays);
        assert_eq!(parse_operating_days("seg-sex 08:00-18:00").unwrap(), weekdays);
        assert_eq!(
            parse_operating_days("Terça-feira e Quinta-feira").unwrap(),
            vec![Weekday::Tue, Weekday::Thu]
        );

        let sunday = NaiveDate::from_ymd(2026, 3, 15);
        assert!(!is_open_on("Segunda-feira a Sexta-feira", sunday));
        assert!(!is_open_on("seg a sex 8h-18h", sunday));
        assert!(is_open_on("Segunda-feira a Sexta-feira", NaiveDate::from_ymd(2026, 3, 13)));
    }

    #[test]
    fn unknown_text_means_open() {
        assert!(parse_operating_days("horário comercial").is_none());
        // 2026-03-15 is a Sunday
        let sunday = NaiveDate::from_ymd(2026, 3, 15);
        assert!(is_open_on("", sunday));
        assert!(is_open_on("todos os dias", sunday));
        assert!(!is_open_on("seg-sab", sunday));
    }
}
