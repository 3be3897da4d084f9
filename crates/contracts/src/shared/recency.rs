//! Сортировка журналов оплат и возвратов по свежести.
//!
//! Время активности записи берётся из `createdAt`, затем из запасного поля
//! даты, иначе это начало эпохи Unix. Время группы равно самому позднему
//! времени её записей. Сортировка по убыванию и устойчивая.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Время для записи без пригодной даты
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Текущее время в формате, который пишут формы (`toISOString`)
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Разобрать RFC 3339, `YYYY-MM-DDTHH:MM:SS` без зоны, дату `YYYY-MM-DD`
/// или миллисекунды от эпохи
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }
    if let Ok(millis) = value.parse::<i64>() {
        return Utc.timestamp_millis_opt(millis).single();
    }
    None
}

/// Время активности записи: основное поле, затем запасное, затем epoch
pub fn activity_timestamp(primary: Option<&str>, secondary: Option<&str>) -> DateTime<Utc> {
    primary
        .and_then(parse_timestamp)
        .or_else(|| secondary.and_then(parse_timestamp))
        .unwrap_or_else(epoch)
}

/// Самое позднее время из набора; пустой набор даёт epoch
pub fn latest_of<I>(timestamps: I) -> DateTime<Utc>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    timestamps.into_iter().max().unwrap_or_else(epoch)
}

/// Записи, у которых есть время последней активности
pub trait Activity {
    fn latest_activity(&self) -> DateTime<Utc>;
}

/// Сначала самые свежие; при равном времени исходный порядок сохраняется
pub fn sort_by_recency<T: Activity>(items: &mut [T]) {
    // sort_by_cached_key устойчив и вычисляет ключ один раз на элемент
    items.sort_by_cached_key(|item| std::cmp::Reverse(item.latest_activity()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Item {
        name: &'static str,
        at: Option<&'static str>,
        fallback: Option<&'static str>,
    }

    impl Activity for Item {
        fn latest_activity(&self) -> DateTime<Utc> {
            activity_timestamp(self.at, self.fallback)
        }
    }

    #[test]
    fn test_parse_supported_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(parse_timestamp("2024-03-15T14:02:26Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-15T14:02:26"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-15"),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("1710511346000"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_activity_fallback_chain() {
        assert_eq!(
            activity_timestamp(Some("bad"), Some("2024-01-02")),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(activity_timestamp(None, None), epoch());
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut items = vec![
            Item { name: "a", at: None, fallback: None },
            Item { name: "b", at: Some("2024-05-01T10:00:00Z"), fallback: None },
            Item { name: "c", at: None, fallback: Some("2024-05-01T10:00:00Z") },
            Item { name: "d", at: Some("2024-06-01"), fallback: None },
            Item { name: "e", at: None, fallback: None },
        ];
        sort_by_recency(&mut items);
        let order: Vec<_> = items.iter().map(|i| i.name).collect();
        assert_eq!(order, vec!["d", "b", "c", "a", "e"]);

        for pair in items.windows(2) {
            assert!(pair[0].latest_activity() >= pair[1].latest_activity());
        }
    }
}
