use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use numbet_core::{ApiClient, DocumentKind, KycDocument, PersonalInfo};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum KycCommands {
    /// Submit identity documents for verification
    Submit {
        /// Full legal name
        #[arg(long)]
        full_name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: NaiveDate,
        /// Residential address
        #[arg(long)]
        address: String,
        /// Government ID number
        #[arg(long)]
        id_number: String,
        /// Aadhaar card scan
        #[arg(long)]
        aadhaar: Option<PathBuf>,
        /// PAN card scan
        #[arg(long)]
        pan: Option<PathBuf>,
        /// Passport scan
        #[arg(long)]
        passport: Option<PathBuf>,
        /// Selfie photo
        #[arg(long)]
        selfie: Option<PathBuf>,
    },
}

pub async fn handle_kyc_command(cmd: KycCommands, client: &ApiClient) -> anyhow::Result<()> {
    match cmd {
        KycCommands::Submit {
            full_name,
            dob,
            address,
            id_number,
            aadhaar,
            pan,
            passport,
            selfie,
        } => {
            let mut documents = Vec::new();
            for (kind, path) in [
                (DocumentKind::Aadhaar, aadhaar),
                (DocumentKind::Pan, pan),
                (DocumentKind::Passport, passport),
                (DocumentKind::Selfie, selfie),
            ] {
                if let Some(path) = path {
                    documents.push(read_document(kind, &path).await?);
                }
            }

            let personal_info = PersonalInfo {
                full_name,
                date_of_birth: dob,
                address,
                id_number,
            };

            println!("Submitting {} document(s)...", documents.len());
            let receipt = client.submit_kyc(documents, personal_info).await?;

            println!("KYC submitted!");
            println!("  KYC ID: {}", receipt.kyc_id);
            println!("  Status: {:?}", receipt.status);
        }
    }

    Ok(())
}

async fn read_document(kind: DocumentKind, path: &Path) -> anyhow::Result<KycDocument> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(KycDocument {
        kind,
        file_name,
        content,
    })
}
