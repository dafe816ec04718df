use super::ApiClient;
use crate::error::{NumbetError, Result};
use crate::types::{
    BankDetails, ConfirmDepositRequest, DepositConfirmation, DepositIntent, DepositRequest,
    HistoryQuery, PaymentMethod, TransactionPage, Utr, WithdrawalReceipt, WithdrawalRequest,
};

impl ApiClient {
    pub async fn initiate_deposit(&self, amount: u64, method: PaymentMethod) -> Result<DepositIntent> {
        if amount == 0 {
            return Err(NumbetError::validation("Deposit amount must be greater than 0"));
        }
        self.require_token()?;

        let intent: DepositIntent = self
            .post("/wallet/deposits", &DepositRequest { amount, method })
            .await?;
        tracing::info!(
            "Deposit {} initiated: {} via {:?} (total {})",
            intent.transaction_id,
            amount,
            method,
            intent.total
        );
        Ok(intent)
    }

    pub async fn confirm_deposit(&self, transaction_id: &str, utr: &Utr) -> Result<DepositConfirmation> {
        if transaction_id.trim().is_empty() {
            return Err(NumbetError::validation("Transaction ID is required"));
        }
        self.require_token()?;

        let path = format!("/wallet/deposits/{}/confirm", transaction_id.trim());
        let confirmation: DepositConfirmation = self
            .post(&path, &ConfirmDepositRequest { utr: utr.clone() })
            .await?;
        tracing::info!(
            "Deposit {} confirmed with UTR {}: {:?}",
            transaction_id,
            utr.as_str(),
            confirmation.status
        );
        Ok(confirmation)
    }

    pub async fn initiate_withdrawal(
        &self,
        amount: u64,
        bank_details: &BankDetails,
    ) -> Result<WithdrawalReceipt> {
        if amount == 0 {
            return Err(NumbetError::validation(
                "Withdrawal amount must be greater than 0",
            ));
        }
        bank_details.validate()?;
        self.require_token()?;

        let receipt: WithdrawalReceipt = self
            .post(
                "/wallet/withdrawals",
                &WithdrawalRequest {
                    amount,
                    bank_details: bank_details.clone(),
                },
            )
            .await?;
        tracing::info!(
            "Withdrawal {} of {} requested: {:?}",
            receipt.transaction_id,
            amount,
            receipt.status
        );
        Ok(receipt)
    }

    pub async fn transaction_history(&self, query: &HistoryQuery) -> Result<TransactionPage> {
        query.validate()?;
        self.require_token()?;

        self.get("/wallet/transactions", &query.query_pairs()).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_server::serve;
    use crate::types::{TransactionStatus, TransactionType};
    use crate::{ApiClient, BankDetails, ClientConfig, ErrorKind, HistoryQuery, NumbetError, PaymentMethod, Utr};

    fn authed(url: String) -> ApiClient {
        let client = ApiClient::new(ClientConfig::new(url)).unwrap();
        client.set_token("tok-123");
        client
    }

    #[tokio::test]
    async fn test_deposit_flow() {
        let (url, mut requests) = serve(vec![
            (
                201,
                r#"{"transactionId":"dep-9","qrCode":"upi://pay?pa=numbet@upi&am=510","total":510}"#,
            ),
            (200, r#"{"status":"pending"}"#),
        ])
        .await;
        let client = authed(url);

        let intent = client.initiate_deposit(500, PaymentMethod::Upi).await.unwrap();
        assert_eq!(intent.transaction_id, "dep-9");
        assert_eq!(intent.total, 510);

        let first = requests.recv().await.unwrap();
        assert!(first.request_line().starts_with("POST /wallet/deposits "));
        let body: serde_json::Value = serde_json::from_str(&first.body).unwrap();
        assert_eq!(body["method"], "upi");
        assert_eq!(body["amount"], 500);

        let utr = Utr::parse("123456789012").unwrap();
        let confirmation = client.confirm_deposit("dep-9", &utr).await.unwrap();
        assert_eq!(confirmation.status, TransactionStatus::Pending);

        let second = requests.recv().await.unwrap();
        assert!(second
            .request_line()
            .starts_with("POST /wallet/deposits/dep-9/confirm "));
        assert!(second.body.contains("\"utr\":\"123456789012\""));
    }

    #[tokio::test]
    async fn test_withdrawal_validation_before_request() {
        let client = authed("http://127.0.0.1:9".to_string());
        let details = BankDetails {
            account_holder: "Ravi Kumar".to_string(),
            account_number: "123456789012".to_string(),
            ifsc: "bad".to_string(),
        };

        let err = client.initiate_withdrawal(1000, &details).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = client
            .initiate_deposit(0, PaymentMethod::Qr)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_withdrawal_rejected() {
        let (url, _requests) = serve(vec![(
            422,
            r#"{"success":false,"error":"insufficient balance"}"#,
        )])
        .await;
        let client = authed(url);
        let details = BankDetails {
            account_holder: "Ravi Kumar".to_string(),
            account_number: "123456789012".to_string(),
            ifsc: "SBIN0004567".to_string(),
        };

        let err = client.initiate_withdrawal(9000, &details).await.unwrap_err();
        assert!(matches!(
            err,
            NumbetError::Server { status: 422, ref message } if message == "insufficient balance"
        ));
    }

    #[tokio::test]
    async fn test_transaction_history_query() {
        let (url, mut requests) = serve(vec![(
            200,
            r#"{"transactions":[{"id":"tx-1","amount":-100,"type":"bet","status":"completed","createdAt":"2026-03-01T12:00:00Z"}],"totalCount":41}"#,
        )])
        .await;
        let client = authed(url);

        let page = client
            .transaction_history(&HistoryQuery::new(3, 20).of_type(TransactionType::Bet))
            .await
            .unwrap();
        assert_eq!(page.total_count, 41);
        assert_eq!(page.transactions.len(), 1);
        assert_eq!(page.transactions[0].tx_type, TransactionType::Bet);

        let request = requests.recv().await.unwrap();
        assert!(request
            .request_line()
            .starts_with("GET /wallet/transactions?page=3&limit=20&type=bet "));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let (url, _requests) = serve(vec![(200, r#"{"unexpected":true}"#)]).await;
        let client = authed(url);

        let err = client
            .transaction_history(&HistoryQuery::new(1, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, NumbetError::Decode(_)));
    }
}
