//! Text helpers shared by the CSV importers
//!
//! POS and weather exports come from Brazilian tools: `;` or `,` delimiters,
//! `DD/MM/YYYY` dates, comma decimals and Portuguese headers.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::AppResult;

/// Keep at most this many row errors in an import summary
pub const MAX_REPORTED_ERRORS: usize = 10;

/// Strip the UTF-8 BOM and the `IMTString(<n>):` prefix some exports carry
pub fn clean_csv(text: &str) -> &str {
    let text = text.trim_start_matches('\u{feff}');
    let text = match text.strip_prefix("IMTString(") {
        Some(rest) => match rest.find("):") {
            Some(end) if rest[..end].chars().all(|c| c.is_ascii_digit()) => {
                rest[end + 2..].trim_start()
            }
            _ => text,
        },
        None => text,
    };
    text.trim()
}

/// `;` when the header line has more semicolons than commas, else `,`
pub fn detect_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or("");
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Parse cleaned CSV text into normalized headers and raw records
pub fn read_csv(text: &str) -> AppResult<(Vec<String>, Vec<csv::StringRecord>)> {
    let text = clean_csv(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(text))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.iter().map(normalize_header).collect();
    let records = reader
        .records()
        .filter(|r| r.as_ref().map_or(true, |record| record.iter().any(|f| !f.is_empty())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((headers, records))
}

/// Lowercase, strip accents, spaces and dashes to underscores
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            ' ' | '-' | '.' => '_',
            other => other,
        })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Index of the first header matching any alias
pub fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias))
}

/// Parse a number in either Brazilian (`1.234,56`) or standard (`1234.56`) form.
///
/// Blank input is zero.
pub fn parse_br_number(value: &str) -> Option<Decimal> {
    let s = value.trim();
    if s.is_empty() {
        return Some(Decimal::ZERO);
    }
    let normalized = if s.contains('.') && s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else if s.contains(',') {
        s.replace(',', ".")
    } else {
        s.to_string()
    };
    Decimal::from_str(&normalized).ok()
}

/// [`parse_br_number`] as a float, for weather readings
pub fn parse_br_float(value: &str) -> Option<f64> {
    parse_br_number(value).and_then(|d| d.to_f64())
}

/// Parse `DD/MM/YYYY` or `DD/MM/YYYY HH:MM[:SS]`; two-digit years are 20YY
pub fn parse_br_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (date_part, time_part) = match value.split_once(' ') {
        Some((date, time)) => (date, time.trim()),
        None => (value, "00:00:00"),
    };

    let mut parts = date_part.split('/');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year_str = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let year: i32 = match year_str.len() {
        2 => 2000 + year_str.parse::<i32>().ok()?,
        _ => year_str.parse().ok()?,
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::parse_from_str(time_part, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time_part, "%H:%M"))
        .ok()?;
    Some(date.and_time(time))
}

/// Parse an ISO `YYYY-MM-DD` date, falling back to the Brazilian format
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_only = value.split(['T', ' ']).next().unwrap_or(value);
    NaiveDate::parse_from_str(date_only, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_br_datetime(value).map(|dt| dt.date()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_csv_strips_bom_and_prefix() {
        assert_eq!(clean_csv("\u{feff}a;b\n1;2\n"), "a;b\n1;2");
        assert_eq!(clean_csv("IMTString(1234): a;b\n1;2"), "a;b\n1;2");
        assert_eq!(clean_csv("IMTString(x): a"), "IMTString(x): a");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("Data_Hora;Valor_Venda;Maquinas"), b';');
        assert_eq!(detect_delimiter("date,temperature,humidity"), b',');
        assert_eq!(detect_delimiter(""), b',');
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Precipitação (mm) "), "precipitacao_mm");
        assert_eq!(normalize_header("Umidade Relativa"), "umidade_relativa");
        assert_eq!(normalize_header("Data_Hora"), "data_hora");
    }

    #[test]
    fn test_parse_br_number() {
        assert_eq!(parse_br_number("1.234,56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_br_number("1,5"), Some(Decimal::new(15, 1)));
        assert_eq!(parse_br_number("17.50"), Some(Decimal::new(1750, 2)));
        assert_eq!(parse_br_number(""), Some(Decimal::ZERO));
        assert_eq!(parse_br_number("abc"), None);
        assert_eq!(parse_br_float("22,4"), Some(22.4));
    }

    #[test]
    fn test_parse_br_datetime() {
        let dt = parse_br_datetime("05/03/2025 14:30:00").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(14, 30, 0).unwrap());

        let short = parse_br_datetime("5/3/25").unwrap();
        assert_eq!(short.date(), NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());

        assert!(parse_br_datetime("2025-03-05").is_none());
        assert!(parse_br_datetime("31/02/2025").is_none());
        assert!(parse_br_datetime("").is_none());
    }

    #[test]
    fn test_parse_date_accepts_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 5);
        assert_eq!(parse_date("2025-03-05"), expected);
        assert_eq!(parse_date("2025-03-05T00:00:00"), expected);
        assert_eq!(parse_date("05/03/2025"), expected);
        assert_eq!(parse_date("March 5"), None);
    }

    #[test]
    fn test_read_csv_semicolon() {
        let (headers, records) = read_csv("\u{feff}Data;Temperatura\n01/01/2025;22,5\n\n02/01/2025;23\n").unwrap();
        assert_eq!(headers, vec!["data", "temperatura"]);
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][1], "22,5");
        assert_eq!(find_column(&headers, &["temp", "temperatura"]), Some(1));
        assert_eq!(find_column(&headers, &["chuva"]), None);
    }
}
