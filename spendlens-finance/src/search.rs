//! Row searches over descriptions and categories. Results keep table order.

use regex::{Regex, RegexBuilder};

use spendlens_core::{Error, Locale, Result, TransactionTable};

/// "+7" followed by 3-3-2-2 digits, optionally separated by single spaces.
pub const PHONE_PATTERN: &str = r"\+7\s?\d{3}\s?\d{3}\s?\d{2}\s?\d{2}";

/// A capitalized surname followed by a capital initial: "Иванов И.", "Ivanov I."
pub const PERSON_PATTERN: &str = r"\p{Lu}\p{Ll}+\s\p{Lu}\.";

fn search_error(search: &str, msg: String) -> Error {
    log::error!("error in {search}: {msg}");
    Error::Search(msg)
}

fn compile(search: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| search_error(search, format!("invalid pattern '{pattern}': {e}")))
}

/// Case-insensitive substring match against description or category.
pub fn simple_search(data: &TransactionTable, query: &str) -> Result<TransactionTable> {
    if query.trim().is_empty() {
        return Err(search_error("simple search", "empty query".to_string()));
    }
    let needle = query.to_lowercase();
    Ok(data.filter(|t| {
        t.description.to_lowercase().contains(&needle) || t.category.to_lowercase().contains(&needle)
    }))
}

/// Rows whose description contains a +7 phone number.
pub fn phone_number_search(data: &TransactionTable) -> Result<TransactionTable> {
    let phone = compile("phone number search", PHONE_PATTERN)?;
    Ok(data.filter(|t| phone.is_match(&t.description)))
}

/// Transfers to private persons: transfers category and "Surname I." in the description.
pub fn person_transfers_search(data: &TransactionTable, locale: &Locale) -> Result<TransactionTable> {
    let person = compile("person transfers search", PERSON_PATTERN)?;
    Ok(data.filter(|t| t.category == locale.transfers_category && person.is_match(&t.description)))
}

/// Rows whose description or category matches a user-supplied regular expression.
pub fn pattern_search(data: &TransactionTable, pattern: &str) -> Result<TransactionTable> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| search_error("pattern search", format!("invalid pattern '{pattern}': {e}")))?;
    Ok(data.filter(|t| re.is_match(&t.description) || re.is_match(&t.category)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spendlens_core::Transaction;

    fn table() -> TransactionTable {
        let ts = NaiveDate::from_ymd_opt(2021, 12, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        vec![
            Transaction::new(ts, -200.0, "Мобильная связь", "Payment +7 912 345 67 89"),
            Transaction::new(ts, -200.0, "Мобильная связь", "Payment 8 912 345 67 89"),
            Transaction::new(ts, -300.0, "Мобильная связь", "МТС +79123456789"),
            Transaction::new(ts, -1000.0, "Переводы", "Иванов И."),
            Transaction::new(ts, -1000.0, "Переводы", "Перевод по номеру"),
            Transaction::new(ts, -500.0, "Супермаркеты", "Петров П."),
            Transaction::new(ts, -150.0, "Фастфуд", "KFC Колхоз"),
        ]
        .into_iter()
        .collect()
    }

    fn descriptions(t: &TransactionTable) -> Vec<&str> {
        t.iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn test_simple_search_case_insensitive() {
        let found = simple_search(&table(), "колхоз").unwrap();
        assert_eq!(descriptions(&found), vec!["KFC Колхоз"]);

        let by_category = simple_search(&table(), "МОБИЛЬНАЯ").unwrap();
        assert_eq!(by_category.len(), 3);
    }

    #[test]
    fn test_simple_search_preserves_order() {
        let found = simple_search(&table(), "payment").unwrap();
        assert_eq!(
            descriptions(&found),
            vec!["Payment +7 912 345 67 89", "Payment 8 912 345 67 89"]
        );
    }

    #[test]
    fn test_empty_query_is_error() {
        assert!(matches!(simple_search(&table(), "  "), Err(Error::Search(_))));
    }

    #[test]
    fn test_phone_numbers() {
        let found = phone_number_search(&table()).unwrap();
        assert_eq!(
            descriptions(&found),
            vec!["Payment +7 912 345 67 89", "МТС +79123456789"]
        );
    }

    #[test]
    fn test_person_transfers() {
        let found = person_transfers_search(&table(), &Locale::russian()).unwrap();
        assert_eq!(descriptions(&found), vec!["Иванов И."]);
    }

    #[test]
    fn test_person_transfers_latin_names() {
        let ts = NaiveDate::from_ymd_opt(2021, 12, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let table: TransactionTable = vec![
            Transaction::new(ts, -1.0, "Transfers", "Ivanov I."),
            Transaction::new(ts, -1.0, "Transfers", "ivanov i."),
        ]
        .into_iter()
        .collect();
        let found = person_transfers_search(&table, &Locale::english()).unwrap();
        assert_eq!(descriptions(&found), vec!["Ivanov I."]);
    }

    #[test]
    fn test_pattern_search() {
        let found = pattern_search(&table(), r"^(kfc|мтс)").unwrap();
        assert_eq!(found.len(), 2);
        assert!(matches!(pattern_search(&table(), "(unclosed"), Err(Error::Search(_))));
    }

    #[test]
    fn test_empty_table() {
        let empty = TransactionTable::default();
        assert!(phone_number_search(&empty).unwrap().is_empty());
        assert!(simple_search(&empty, "x").unwrap().is_empty());
    }
}
