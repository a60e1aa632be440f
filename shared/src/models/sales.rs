//! Sales models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single sales transaction, already parsed from the POS export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    /// Paid amount after cashback
    pub net_revenue: Decimal,
    /// Wash + dry cycles sold in this transaction
    pub service_count: u32,
    /// Wallet top-ups carry revenue but no services
    pub is_top_up: bool,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, net_revenue: Decimal, service_count: u32) -> Self {
        Self {
            date,
            net_revenue,
            service_count,
            is_top_up: false,
        }
    }

    pub fn top_up(date: NaiveDate, net_revenue: Decimal) -> Self {
        Self {
            date,
            net_revenue,
            service_count: 0,
            is_top_up: true,
        }
    }

    /// Services that count towards daily throughput
    pub fn counted_services(&self) -> u32 {
        if self.is_top_up {
            0
        } else {
            self.service_count
        }
    }
}

/// How a POS transaction was paid for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Machines paid with card or cash
    Purchase,
    /// Machines paid from the customer's wallet balance
    WalletPurchase,
    /// Wallet recharge
    TopUp,
    Unknown,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Purchase => write!(f, "Purchase"),
            TransactionType::WalletPurchase => write!(f, "Wallet Purchase"),
            TransactionType::TopUp => write!(f, "Top-up"),
            TransactionType::Unknown => write!(f, "Unknown"),
        }
    }
}
