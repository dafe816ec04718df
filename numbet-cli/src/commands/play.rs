use super::prompt;
use crate::config::CliConfig;
use async_trait::async_trait;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::{Input, Select};
use numbet_core::{ApiClient, BetReceipt, BetStatus, Pool, ScopedTimer};
use numbet_game::{BetBackend, BettingError, BettingSurface, Selection, ToggleOutcome, WagerBatch};
use std::time::Duration;
use tokio::sync::oneshot;

const AUTO_CLOSE: Duration = Duration::from_secs(5);

#[derive(Args)]
pub struct PlayArgs {
    /// Game to bet on
    game_id: String,

    /// Print the batch instead of sending it to the server
    #[arg(long)]
    dry_run: bool,
}

enum MenuItem {
    Pick(Pool),
    Show,
    Place,
    Close,
}

const MENU: [(&str, MenuItem); 6] = [
    ("Pick a number (1-100)", MenuItem::Pick(Pool::Numbers)),
    ("Pick an Andar digit (0-9)", MenuItem::Pick(Pool::Andar)),
    ("Pick a Bahar digit (0-9)", MenuItem::Pick(Pool::Bahar)),
    ("Show selections", MenuItem::Show),
    ("Place all bets", MenuItem::Place),
    ("Close", MenuItem::Close),
];

pub async fn handle_play_command(
    args: PlayArgs,
    client: &ApiClient,
    config: &CliConfig,
) -> anyhow::Result<()> {
    let mut surface = BettingSurface::new(args.game_id, config.stake_limits()?)?;
    surface.open();

    let backend: Box<dyn BetBackend> = if args.dry_run {
        Box::new(DryRunBackend)
    } else {
        Box::new(client.clone())
    };

    println!(
        "Game {}: stakes {} to {}",
        surface.game_id(),
        surface.limits().min,
        surface.limits().max
    );

    loop {
        let labels: Vec<String> = MENU
            .iter()
            .map(|(label, item)| match item {
                MenuItem::Place => format!("{} (total {})", label, surface.total()),
                _ => label.to_string(),
            })
            .collect();
        let choice = prompt(move || {
            Select::new()
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()
        })
        .await?;

        match &MENU[choice].1 {
            MenuItem::Pick(pool) => pick(&mut surface, *pool).await?,
            MenuItem::Show => show(&surface),
            MenuItem::Place => match surface.submit(backend.as_ref()).await {
                Ok(receipt) => {
                    println!(
                        "Bets placed! Receipt: {} ({:?})",
                        receipt.receipt_id, receipt.status
                    );
                    println!("Press Enter to close now.");
                    let mut timer = ScopedTimer::countdown(
                        AUTO_CLOSE,
                        Duration::from_secs(1),
                        |remaining| println!("Closing in {}s...", remaining.as_secs()),
                        || println!("Closed."),
                    );
                    let dismissed = tokio::select! {
                        _ = timer.finished() => false,
                        _ = enter_pressed() => true,
                    };
                    if dismissed {
                        timer.cancel();
                        println!("Closed.");
                    }
                    return Ok(());
                }
                Err(BettingError::EmptyLedger) => println!("Pick at least one number first."),
                Err(e) => {
                    println!("Could not place bets: {}", e);
                    println!("Your selections are kept; choose 'Place all bets' to retry.");
                }
            },
            MenuItem::Close => {
                surface.close();
                println!("Selections discarded.");
                return Ok(());
            }
        }
    }
}

async fn pick(surface: &mut BettingSurface, pool: Pool) -> anyhow::Result<()> {
    let (low, high) = match pool {
        Pool::Numbers => (1, 100),
        Pool::Andar | Pool::Bahar => (0, 9),
    };
    let number: u8 = prompt(move || {
        Input::new()
            .with_prompt(format!("{} ({}-{})", pool, low, high))
            .validate_with(move |n: &u8| {
                if (low..=high).contains(n) {
                    Ok(())
                } else {
                    Err(format!("must be between {} and {}", low, high))
                }
            })
            .interact_text()
    })
    .await?;

    let selection = Selection::in_pool(pool, number)?;
    match surface.toggle(selection)? {
        ToggleOutcome::Removed(entry) => {
            println!("Removed {} (stake {})", entry.selection, entry.amount);
            Ok(())
        }
        ToggleOutcome::PickerOpened => choose_amount(surface).await,
    }
}

/// Drive the amount dialog until a stake is accepted or the user cancels.
async fn choose_amount(surface: &mut BettingSurface) -> anyhow::Result<()> {
    let Some(picker) = surface.picker() else {
        return Ok(());
    };
    let candidate = picker.candidate();
    let quick = picker.quick_stakes();

    let mut items: Vec<String> = quick.iter().map(|a| a.to_string()).collect();
    items.push("Enter amount".to_string());
    items.push("Cancel".to_string());

    let title = format!("Stake on {}", candidate);
    let choice = prompt(move || {
        Select::new()
            .with_prompt(title)
            .items(&items)
            .default(0)
            .interact()
    })
    .await?;

    if choice < quick.len() {
        surface.quick_pick(quick[choice])?;
        println!("Added {} for {}", candidate, quick[choice]);
        return Ok(());
    }
    if choice == quick.len() + 1 {
        surface.cancel_picker()?;
        return Ok(());
    }

    loop {
        let input: String = prompt(|| {
            Input::new()
                .with_prompt("Amount (empty to cancel)")
                .allow_empty(true)
                .interact_text()
        })
        .await?;

        if input.trim().is_empty() {
            surface.cancel_picker()?;
            return Ok(());
        }

        surface.enter_amount(&input)?;
        match surface.confirm_amount() {
            Ok(_) => {
                println!("Added {} for {}", candidate, input.trim());
                return Ok(());
            }
            Err(e @ (BettingError::StakeOutOfRange { .. } | BettingError::InvalidAmount(_))) => {
                println!("{}", e);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn show(surface: &BettingSurface) {
    if surface.entries().is_empty() {
        println!("No selections yet.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Pool", "Selection", "Stake"]);
    for entry in surface.entries() {
        table.add_row(vec![
            entry.id.0.to_string(),
            entry.selection.pool().to_string(),
            entry.selection.to_string(),
            entry.amount.to_string(),
        ]);
    }

    println!("{}", table);
    println!("Total: {}", surface.total());
}

/// Resolves when a line is read from stdin.
///
/// The read runs on a plain thread rather than the blocking pool so a
/// pending read does not hold up runtime shutdown.
async fn enter_pressed() {
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_ok() {
            let _ = tx.send(());
        }
    });
    if rx.await.is_err() {
        // stdin closed; leave it to the countdown.
        std::future::pending::<()>().await;
    }
}

/// Prints the batch that would be sent and acknowledges it locally.
struct DryRunBackend;

#[async_trait]
impl BetBackend for DryRunBackend {
    async fn submit(&self, batch: &WagerBatch) -> numbet_game::Result<BetReceipt> {
        match serde_json::to_string_pretty(&batch.to_request()) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!("Could not render batch: {}", e),
        }
        Ok(BetReceipt {
            receipt_id: format!("dry-run-{}", batch.id()),
            status: BetStatus::Pending,
        })
    }
}
