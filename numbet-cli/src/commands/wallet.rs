use super::prompt;
use clap::{Subcommand, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::Input;
use numbet_core::{
    ApiClient, BankDetails, HistoryQuery, PaymentMethod, ScopedTimer, TransactionType, Utr,
};
use std::time::Duration;

/// How long the payment page stays valid after a deposit is initiated.
const PAYMENT_WINDOW: Duration = Duration::from_secs(10 * 60);
const PAYMENT_REMINDER: Duration = Duration::from_secs(60);

#[derive(Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Upi,
    Qr,
    Bank,
}

impl From<MethodArg> for PaymentMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Upi => PaymentMethod::Upi,
            MethodArg::Qr => PaymentMethod::Qr,
            MethodArg::Bank => PaymentMethod::BankTransfer,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TypeArg {
    Deposit,
    Withdrawal,
    Bet,
    Win,
    Refund,
}

impl From<TypeArg> for TransactionType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Deposit => TransactionType::Deposit,
            TypeArg::Withdrawal => TransactionType::Withdrawal,
            TypeArg::Bet => TransactionType::Bet,
            TypeArg::Win => TransactionType::Win,
            TypeArg::Refund => TransactionType::Refund,
        }
    }
}

#[derive(Subcommand)]
pub enum WalletCommands {
    /// Start a deposit and confirm it with the bank UTR
    Deposit {
        /// Amount to add
        amount: u64,
        /// Payment method
        #[arg(short, long, value_enum, default_value = "upi")]
        method: MethodArg,
    },
    /// Confirm an earlier deposit with its UTR
    Confirm {
        /// Deposit transaction ID
        transaction_id: String,
        /// 12-digit UTR from the bank
        utr: String,
    },
    /// Withdraw to a bank account
    Withdraw {
        /// Amount to withdraw
        amount: u64,
        /// Account holder name
        #[arg(long)]
        holder: String,
        /// Bank account number
        #[arg(long)]
        account: String,
        /// IFSC code
        #[arg(long)]
        ifsc: String,
    },
    /// Show transaction history
    History {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Rows per page
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
        /// Only show one transaction type
        #[arg(short = 't', long = "type", value_enum)]
        tx_type: Option<TypeArg>,
    },
}

pub async fn handle_wallet_command(cmd: WalletCommands, client: &ApiClient) -> anyhow::Result<()> {
    match cmd {
        WalletCommands::Deposit { amount, method } => {
            let intent = client.initiate_deposit(amount, method.into()).await?;

            println!("Deposit started!");
            println!("  Transaction ID: {}", intent.transaction_id);
            println!("  Amount to pay: {}", intent.total);
            println!("  Pay using: {}", intent.qr_code);
            println!();

            // Reminders stop as soon as the prompt returns.
            let reminder = ScopedTimer::countdown(
                PAYMENT_WINDOW,
                PAYMENT_REMINDER,
                |remaining| {
                    if remaining < PAYMENT_WINDOW {
                        eprintln!("  {} minute(s) left to pay", remaining.as_secs() / 60);
                    }
                },
                || eprintln!("  Payment window expired; the server may reject this deposit"),
            );

            let utr_input: String = prompt(|| {
                Input::new()
                    .with_prompt("UTR after paying (leave empty to confirm later)")
                    .allow_empty(true)
                    .interact_text()
            })
            .await?;
            drop(reminder);

            if utr_input.trim().is_empty() {
                println!("Confirm later with:");
                println!("numbet wallet confirm {} <utr>", intent.transaction_id);
                return Ok(());
            }

            let utr = Utr::parse(&utr_input)?;
            let confirmation = client.confirm_deposit(&intent.transaction_id, &utr).await?;
            println!("Deposit status: {:?}", confirmation.status);
        }

        WalletCommands::Confirm {
            transaction_id,
            utr,
        } => {
            let utr = Utr::parse(&utr)?;
            let confirmation = client.confirm_deposit(&transaction_id, &utr).await?;
            println!(
                "Deposit {} status: {:?}",
                transaction_id, confirmation.status
            );
        }

        WalletCommands::Withdraw {
            amount,
            holder,
            account,
            ifsc,
        } => {
            let details = BankDetails {
                account_holder: holder,
                account_number: account,
                ifsc: ifsc.to_uppercase(),
            };
            let receipt = client.initiate_withdrawal(amount, &details).await?;

            println!("Withdrawal requested!");
            println!("  Transaction ID: {}", receipt.transaction_id);
            println!("  Status: {:?}", receipt.status);
        }

        WalletCommands::History {
            page,
            limit,
            tx_type,
        } => {
            let mut query = HistoryQuery::new(page, limit);
            if let Some(tx_type) = tx_type {
                query = query.of_type(tx_type.into());
            }
            let history = client.transaction_history(&query).await?;

            if history.transactions.is_empty() {
                println!("No transactions.");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["ID", "Type", "Amount", "Status", "Date", "Reference"]);

            for tx in &history.transactions {
                table.add_row(vec![
                    tx.id.clone(),
                    tx.tx_type.as_str().to_string(),
                    format!("{:+}", tx.amount),
                    format!("{:?}", tx.status),
                    tx.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    tx.reference.clone().unwrap_or_default(),
                ]);
            }

            println!("{}", table);
            let pages = history.total_count.div_ceil(u64::from(limit));
            println!(
                "Page {} of {} ({} transactions)",
                page,
                pages.max(1),
                history.total_count
            );
        }
    }

    Ok(())
}
