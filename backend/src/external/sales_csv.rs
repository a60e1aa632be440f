//! POS sales export importer
//!
//! Turns the POS CSV export into [`SalesRecord`]s: classifies transactions,
//! counts wash/dry machines, applies cashback and drops duplicate rows.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use sha2::{Digest, Sha256};
use shared::{SalesRecord, TransactionType};

use super::parsing::{find_column, parse_br_datetime, parse_br_number, read_csv, MAX_REPORTED_ERRORS};
use crate::error::{AppError, AppResult};

/// Cashback policy applied when computing net revenue
#[derive(Debug, Clone)]
pub struct CashbackPolicy {
    /// Fraction of gross sales (0.075 for 7.5%)
    pub rate: Decimal,
    pub start_date: NaiveDate,
}

impl CashbackPolicy {
    pub fn none() -> Self {
        Self {
            rate: Decimal::ZERO,
            start_date: NaiveDate::MAX,
        }
    }
}

/// Row counts from one import
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct IngestSummary {
    pub total: usize,
    pub accepted: usize,
    pub skipped: usize,
    pub duplicates: usize,
    pub top_ups: usize,
    pub unclassified: usize,
    pub errors: Vec<String>,
}

impl IngestSummary {
    /// Count a skipped row, keeping the first few messages
    pub fn skip(&mut self, message: impl Into<String>) {
        self.skipped += 1;
        if self.errors.len() < MAX_REPORTED_ERRORS {
            self.errors.push(message.into());
        }
    }
}

/// Records and counts from one sales import
#[derive(Debug, Clone)]
pub struct SalesImport {
    pub records: Vec<SalesRecord>,
    pub summary: IngestSummary,
}

/// Wash and dry machines listed on a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineCount {
    pub wash: u32,
    pub dry: u32,
}

impl MachineCount {
    pub fn total(&self) -> u32 {
        self.wash + self.dry
    }
}

/// Count `lavadora` (wash) and `secadora` (dry) entries in the machine list
pub fn count_machines(machines: &str) -> MachineCount {
    let lower = machines.to_lowercase();
    let mut count = MachineCount { wash: 0, dry: 0 };
    for machine in lower.split(',') {
        if machine.contains("lavadora") {
            count.wash += 1;
        }
        if machine.contains("secadora") {
            count.dry += 1;
        }
    }
    count
}

/// Classify a transaction from its machine list, payment method and gross value
pub fn classify_transaction(machines: &str, payment_method: &str, gross: Decimal) -> TransactionType {
    let machines = machines.to_lowercase();
    let payment_method = payment_method.to_lowercase();

    if machines.contains("recarga") {
        return TransactionType::TopUp;
    }
    if payment_method.contains("saldo da carteira") {
        return TransactionType::WalletPurchase;
    }
    if gross.is_zero() && !machines.is_empty() {
        return TransactionType::WalletPurchase;
    }
    if !machines.is_empty() && gross > Decimal::ZERO {
        return TransactionType::Purchase;
    }
    TransactionType::Unknown
}

/// Customer document as 11 digits: non-digits removed, left-padded or
/// trimmed to the last 11. Empty when there are no digits.
pub fn normalize_document(doc: &str) -> String {
    let digits: String = doc.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return digits;
    }
    if digits.len() > 11 {
        digits[digits.len() - 11..].to_string()
    } else {
        format!("{:0>11}", digits)
    }
}

/// Deduplication key: first 32 hex chars of SHA-256 over the raw fields
pub fn import_hash(date_time: &str, document: &str, gross: &str, machines: &str) -> String {
    let digest = Sha256::digest(format!("{}|{}|{}|{}", date_time, document, gross, machines).as_bytes());
    digest
        .iter()
        .take(16)
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Cashback in cents, computed on binary floats and rounded half to even so
/// amounts match the ones already stored by the upload pipeline
/// (1.00 at 7.5% is 0.07, not 0.08).
pub fn cashback_amount(gross: Decimal, rate: Decimal) -> Decimal {
    let exact = gross * rate;
    let product = match (gross.to_f64(), rate.to_f64()) {
        (Some(g), Some(r)) => Decimal::from_f64_retain(g * r).unwrap_or(exact),
        _ => exact,
    };
    product.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Paid amount minus cashback, when cashback applies on that date
pub fn net_revenue(date: NaiveDate, gross: Decimal, paid: Decimal, policy: &CashbackPolicy) -> Decimal {
    if date >= policy.start_date && gross > Decimal::ZERO {
        paid - cashback_amount(gross, policy.rate)
    } else {
        paid
    }
}

struct Columns {
    date_time: usize,
    document: usize,
    gross: usize,
    paid: usize,
    machines: usize,
    payment_method: Option<usize>,
}

impl Columns {
    fn locate(headers: &[String]) -> AppResult<Self> {
        let required = |name: &str| {
            find_column(headers, &[name]).ok_or_else(|| AppError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            date_time: required("data_hora")?,
            document: required("doc_cliente")?,
            gross: required("valor_venda")?,
            paid: required("valor_pago")?,
            machines: required("maquinas")?,
            payment_method: find_column(headers, &["meio_de_pagamento"]),
        })
    }
}

/// Parse a POS sales export
pub fn parse_sales_csv(text: &str, policy: &CashbackPolicy) -> AppResult<SalesImport> {
    let (headers, rows) = read_csv(text)?;
    let mut summary = IngestSummary {
        total: rows.len(),
        ..IngestSummary::default()
    };
    if rows.is_empty() {
        return Ok(SalesImport {
            records: Vec::new(),
            summary,
        });
    }

    let columns = Columns::locate(&headers)?;
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let line = i + 2;
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let Some(date_time) = parse_br_datetime(field(columns.date_time)) else {
            summary.skip(format!("Row {}: invalid date '{}'", line, field(columns.date_time)));
            continue;
        };
        if normalize_document(field(columns.document)).is_empty() {
            summary.skip(format!("Row {}: missing customer document", line));
            continue;
        }
        let (Some(gross), Some(paid)) = (parse_br_number(field(columns.gross)), parse_br_number(field(columns.paid))) else {
            summary.skip(format!("Row {}: invalid amount", line));
            continue;
        };

        let machines = field(columns.machines);
        let hash = import_hash(field(columns.date_time), field(columns.document), field(columns.gross), machines);
        if !seen.insert(hash) {
            summary.duplicates += 1;
            continue;
        }

        let payment_method = columns.payment_method.map(field).unwrap_or("");
        let transaction_type = classify_transaction(machines, payment_method, gross);
        match transaction_type {
            TransactionType::TopUp => summary.top_ups += 1,
            TransactionType::Unknown => summary.unclassified += 1,
            _ => {}
        }

        let date = date_time.date();
        records.push(SalesRecord {
            date,
            net_revenue: net_revenue(date, gross, paid, policy),
            service_count: count_machines(machines).total(),
            is_top_up: transaction_type == TransactionType::TopUp,
        });
    }

    summary.accepted = records.len();
    Ok(SalesImport { records, summary })
}

/// Read and parse a POS sales export from disk
pub fn load_sales_csv(path: &Path, policy: &CashbackPolicy) -> AppResult<SalesImport> {
    let text = std::fs::read_to_string(path)?;
    let import = parse_sales_csv(&text, policy)?;
    tracing::info!(
        "Loaded {} sales records from {} ({} skipped, {} duplicates)",
        import.summary.accepted,
        path.display(),
        import.summary.skipped,
        import.summary.duplicates
    );
    Ok(import)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn policy() -> CashbackPolicy {
        CashbackPolicy {
            rate: dec("0.075"),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_count_machines() {
        let count = count_machines("Lavadora 1, Secadora 2, Lavadora 3");
        assert_eq!(count, MachineCount { wash: 2, dry: 1 });
        assert_eq!(count.total(), 3);
        assert_eq!(count_machines("").total(), 0);
        assert_eq!(count_machines("Recarga").total(), 0);
    }

    #[test]
    fn test_classify_transaction() {
        assert_eq!(classify_transaction("Recarga", "Pix", dec("50")), TransactionType::TopUp);
        assert_eq!(
            classify_transaction("Lavadora 1", "Saldo da Carteira", dec("17.50")),
            TransactionType::WalletPurchase
        );
        assert_eq!(classify_transaction("Lavadora 1", "Pix", Decimal::ZERO), TransactionType::WalletPurchase);
        assert_eq!(classify_transaction("Lavadora 1", "Crédito", dec("17.50")), TransactionType::Purchase);
        assert_eq!(classify_transaction("", "Pix", dec("10")), TransactionType::Unknown);
    }

    #[test]
    fn test_normalize_document() {
        assert_eq!(normalize_document("123.456.789-09"), "12345678909");
        assert_eq!(normalize_document("1234"), "00000001234");
        assert_eq!(normalize_document("9912345678909"), "12345678909");
        assert_eq!(normalize_document("n/d"), "");
    }

    #[test]
    fn test_import_hash_is_stable() {
        let a = import_hash("01/02/2025 10:00:00", "123", "17,50", "Lavadora 1");
        let b = import_hash("01/02/2025 10:00:00", "123", "17,50", "Lavadora 1");
        let c = import_hash("01/02/2025 10:00:01", "123", "17,50", "Lavadora 1");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn test_cashback_rounds_like_float_uploader() {
        let rate = dec("0.075");
        // 1.00 * 0.075 is 0.07499999... as a float
        assert_eq!(cashback_amount(dec("1.00"), rate), dec("0.07"));
        assert_eq!(cashback_amount(dec("13.00"), rate), dec("0.97"));
        assert_eq!(cashback_amount(dec("7.00"), rate), dec("0.53"));
        // Exact binary halves go to the even cent
        assert_eq!(cashback_amount(dec("5.00"), rate), dec("0.38"));
        assert_eq!(cashback_amount(dec("1.00"), dec("0.125")), dec("0.12"));

        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(net_revenue(date, dec("1.00"), dec("1.00"), &policy()), dec("0.93"));
    }

    #[test]
    fn test_net_revenue_cashback() {
        let after = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let before = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();

        // 7.5% of 17.50 = 1.3125 -> 1.31
        assert_eq!(net_revenue(after, dec("17.50"), dec("17.50"), &policy()), dec("16.19"));
        assert_eq!(net_revenue(before, dec("17.50"), dec("17.50"), &policy()), dec("17.50"));
        assert_eq!(net_revenue(after, Decimal::ZERO, Decimal::ZERO, &policy()), Decimal::ZERO);
        assert_eq!(net_revenue(after, dec("20"), dec("20"), &CashbackPolicy::none()), dec("20"));
    }
}
