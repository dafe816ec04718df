use super::prompt;
use clap::Subcommand;
use dialoguer::Password;
use numbet_core::{ApiClient, AuthSession, ProfileUpdate, RegisterProfile};

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in with phone number and password
    Login {
        /// Mobile number (10 digits, +91 optional)
        phone: String,
    },
    /// Create a new account
    Register {
        /// Full name
        name: String,
        /// Mobile number (10 digits, +91 optional)
        phone: String,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Referral code
        #[arg(short, long)]
        referral: Option<String>,
    },
    /// Update profile fields
    Profile {
        /// New display name
        #[arg(short, long)]
        name: Option<String>,
        /// New email address
        #[arg(short, long)]
        email: Option<String>,
    },
}

pub async fn handle_auth_command(cmd: AuthCommands, client: &ApiClient) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { phone } => {
            let password = prompt(|| Password::new().with_prompt("Password").interact()).await?;

            let session = client.login(&phone, &password).await?;
            print_session("Logged in", &session);
        }

        AuthCommands::Register {
            name,
            phone,
            email,
            referral,
        } => {
            let password = prompt(|| {
                Password::new()
                    .with_prompt("Choose a password")
                    .with_confirmation("Repeat password", "Passwords do not match")
                    .interact()
            })
            .await?;

            let profile = RegisterProfile {
                name,
                phone,
                password,
                email,
                referral_code: referral,
            };
            let session = client.register(&profile).await?;
            print_session("Registered", &session);
        }

        AuthCommands::Profile { name, email } => {
            let user = client.update_profile(&ProfileUpdate { name, email }).await?;

            println!("Profile updated:");
            println!("  Name: {}", user.name);
            println!("  Phone: {}", user.phone);
            if let Some(email) = &user.email {
                println!("  Email: {}", email);
            }
        }
    }

    Ok(())
}

fn print_session(action: &str, session: &AuthSession) {
    let user = &session.user;
    println!("{} as {} ({})", action, user.name, user.phone);
    println!("  User ID: {}", user.id);
    println!("  KYC: {:?}", user.kyc_status);
    println!("  Balance: {}", user.balance);
    println!();
    println!("To use this session in later commands:");
    println!("export NUMBET_TOKEN={}", session.token);
}
