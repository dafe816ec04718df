use crate::error::{NumbetError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The three number pools a bet can be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pool {
    Numbers,
    Andar,
    Bahar,
}

impl Pool {
    pub const ALL: [Pool; 3] = [Pool::Numbers, Pool::Andar, Pool::Bahar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pool::Numbers => "numbers",
            Pool::Andar => "andar",
            Pool::Bahar => "bahar",
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    NotSubmitted,
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_kyc_status")]
    pub kyc_status: KycStatus,
    #[serde(default)]
    pub balance: u64,
}

fn default_kyc_status() -> KycStatus {
    KycStatus::NotSubmitted
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfile {
    pub name: String,
    pub phone: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

impl RegisterProfile {
    /// Checks the form and returns a copy with the phone number normalized.
    pub fn validated(&self) -> Result<Self> {
        if self.name.trim().is_empty() {
            return Err(NumbetError::validation("Name is required"));
        }
        if self.password.chars().count() < 6 {
            return Err(NumbetError::validation(
                "Password must be at least 6 characters",
            ));
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }

        Ok(Self {
            name: self.name.trim().to_string(),
            phone: normalize_phone(&self.phone)?,
            password: self.password.clone(),
            email: self.email.clone(),
            referral_code: self.referral_code.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_none() && self.email.is_none() {
            return Err(NumbetError::validation("Nothing to update"));
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(NumbetError::validation("Name cannot be empty"));
            }
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(NumbetError::validation(format!(
            "Invalid email address: {}",
            email
        ))),
    }
}

/// Normalizes an Indian mobile number to its 10 digits.
///
/// Spaces and dashes are ignored and a leading `+91` is stripped.
pub fn normalize_phone(phone: &str) -> Result<String> {
    let compact: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let digits = compact.strip_prefix("+91").unwrap_or(&compact);

    if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(NumbetError::validation(format!(
            "Phone number must have 10 digits, got '{}'",
            phone
        )));
    }

    Ok(digits.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Aadhaar,
    Pan,
    Passport,
    Selfie,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycDocument {
    pub kind: DocumentKind,
    pub file_name: String,
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub id_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycSubmission {
    pub documents: Vec<KycDocument>,
    pub personal_info: PersonalInfo,
}

impl KycSubmission {
    pub fn validate(&self) -> Result<()> {
        if self.documents.is_empty() {
            return Err(NumbetError::validation("At least one document is required"));
        }
        if let Some(doc) = self.documents.iter().find(|d| d.content.is_empty()) {
            return Err(NumbetError::validation(format!(
                "Document '{}' is empty",
                doc.file_name
            )));
        }

        let info = &self.personal_info;
        for (field, value) in [
            ("Full name", &info.full_name),
            ("Address", &info.address),
            ("ID number", &info.id_number),
        ] {
            if value.trim().is_empty() {
                return Err(NumbetError::validation(format!("{} is required", field)));
            }
        }
        if info.date_of_birth >= Utc::now().date_naive() {
            return Err(NumbetError::validation(
                "Date of birth must be in the past",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycReceipt {
    pub kyc_id: String,
    pub status: KycStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Upi,
    Qr,
    BankTransfer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DepositRequest {
    pub amount: u64,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositIntent {
    pub transaction_id: String,
    pub qr_code: String,
    pub total: u64,
}

/// Bank-issued reference for a manual transfer: exactly 12 digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Utr(String);

impl Utr {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.len() != 12 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(NumbetError::validation(format!(
                "UTR must be exactly 12 digits, got '{}'",
                value
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Utr {
    type Error = NumbetError;

    fn try_from(value: String) -> Result<Self> {
        Utr::parse(&value)
    }
}

impl From<Utr> for String {
    fn from(utr: Utr) -> Self {
        utr.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ConfirmDepositRequest {
    pub utr: Utr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositConfirmation {
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_holder: String,
    pub account_number: String,
    pub ifsc: String,
}

impl BankDetails {
    pub fn validate(&self) -> Result<()> {
        if self.account_holder.trim().is_empty() {
            return Err(NumbetError::validation("Account holder name is required"));
        }

        let number = &self.account_number;
        if !(9..=18).contains(&number.len()) || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(NumbetError::validation(
                "Account number must be 9 to 18 digits",
            ));
        }

        // AAAA0XXXXXX
        let ifsc = self.ifsc.as_bytes();
        let valid_ifsc = ifsc.len() == 11
            && ifsc[..4].iter().all(|b| b.is_ascii_uppercase())
            && ifsc[4] == b'0'
            && ifsc[5..].iter().all(|b| b.is_ascii_alphanumeric());
        if !valid_ifsc {
            return Err(NumbetError::validation(format!(
                "Invalid IFSC code: {}",
                self.ifsc
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WithdrawalRequest {
    pub amount: u64,
    pub bank_details: BankDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalReceipt {
    pub transaction_id: String,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Bet,
    Win,
    Refund,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Bet => "bet",
            TransactionType::Win => "win",
            TransactionType::Refund => "refund",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: i64, // +ve credit, -ve debit
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    pub page: u32,
    pub limit: u32,
    pub tx_type: Option<TransactionType>,
}

impl HistoryQuery {
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            tx_type: None,
        }
    }

    pub fn of_type(mut self, tx_type: TransactionType) -> Self {
        self.tx_type = Some(tx_type);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(NumbetError::validation("Page numbers start at 1"));
        }
        if self.limit == 0 || self.limit > Self::MAX_LIMIT {
            return Err(NumbetError::validation(format!(
                "Limit must be between 1 and {}",
                Self::MAX_LIMIT
            )));
        }
        Ok(())
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(tx_type) = self.tx_type {
            pairs.push(("type", tx_type.as_str().to_string()));
        }
        pairs
    }
}

/// One wager line as sent to the betting backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBet {
    pub pool: Pool,
    pub number: u8,
    pub amount: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBetsRequest {
    /// Stable across retries of the same batch so the backend can deduplicate.
    pub batch_id: Uuid,
    pub game_id: String,
    pub bets: Vec<PlacedBet>,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetStatus {
    Accepted,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetReceipt {
    pub receipt_id: String,
    pub status: BetStatus,
}

mod base64_bytes {
    use base64::{engine::general_purpose, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        general_purpose::STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
