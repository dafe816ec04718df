use super::ApiClient;
use crate::error::{NumbetError, Result};
use crate::types::{
    normalize_phone, AuthSession, KycDocument, KycReceipt, KycSubmission, LoginRequest,
    PersonalInfo, ProfileUpdate, RegisterProfile, User,
};

impl ApiClient {
    /// Log in and keep the returned bearer token for later calls.
    pub async fn login(&self, phone: &str, password: &str) -> Result<AuthSession> {
        let phone = normalize_phone(phone)?;
        if password.is_empty() {
            return Err(NumbetError::validation("Password is required"));
        }

        let session: AuthSession = self
            .post(
                "/auth/login",
                &LoginRequest {
                    phone,
                    password: password.to_string(),
                },
            )
            .await?;
        self.set_token(session.token.clone());

        tracing::info!("Logged in as user {}", session.user.id);
        Ok(session)
    }

    /// Register a new account and keep the returned bearer token.
    pub async fn register(&self, profile: &RegisterProfile) -> Result<AuthSession> {
        let profile = profile.validated()?;

        let session: AuthSession = self.post("/auth/register", &profile).await?;
        self.set_token(session.token.clone());

        tracing::info!("Registered user {}", session.user.id);
        Ok(session)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        update.validate()?;
        self.require_token()?;

        let user: User = self.put("/users/me", update).await?;
        tracing::info!("Updated profile for user {}", user.id);
        Ok(user)
    }

    pub async fn submit_kyc(
        &self,
        documents: Vec<KycDocument>,
        personal_info: PersonalInfo,
    ) -> Result<KycReceipt> {
        let submission = KycSubmission {
            documents,
            personal_info,
        };
        submission.validate()?;
        self.require_token()?;

        let receipt: KycReceipt = self.post("/kyc", &submission).await?;
        tracing::info!(
            "Submitted KYC {} with {} document(s): {:?}",
            receipt.kyc_id,
            submission.documents.len(),
            receipt.status
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_server::serve;
    use crate::types::{DocumentKind, KycStatus};
    use crate::{
        ApiClient, ClientConfig, ErrorKind, KycDocument, NumbetError, PersonalInfo,
        ProfileUpdate, RegisterProfile,
    };
    use chrono::NaiveDate;

    const SESSION: &str = r#"{"user":{"id":"u-1","name":"Ravi","phone":"9876543210","kycStatus":"pending","balance":250},"token":"tok-123"}"#;

    #[tokio::test]
    async fn test_login_stores_token() {
        let (url, mut requests) = serve(vec![(200, SESSION)]).await;
        let client = ApiClient::new(ClientConfig::new(url)).unwrap();

        let session = client.login("+91 98765 43210", "secret").await.unwrap();
        assert_eq!(session.user.id, "u-1");
        assert_eq!(session.user.kyc_status, KycStatus::Pending);
        assert_eq!(client.token().as_deref(), Some("tok-123"));

        let request = requests.recv().await.unwrap();
        assert!(request.request_line().starts_with("POST /auth/login "));
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["phone"], "9876543210");
        assert!(request.header("authorization").is_none());
    }

    #[tokio::test]
    async fn test_login_rejected_by_server() {
        let (url, _requests) = serve(vec![(401, r#"{"message":"wrong password"}"#)]).await;
        let client = ApiClient::new(ClientConfig::new(url)).unwrap();

        let err = client.login("9876543210", "nope").await.unwrap_err();
        assert!(matches!(err, NumbetError::Unauthorized(ref m) if m == "wrong password"));
        assert_eq!(err.kind(), ErrorKind::ServerRejected);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_invalid_login_never_hits_network() {
        // Port 9 (discard) is never contacted because validation fails first.
        let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();

        let err = client.login("123", "secret").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = client.login("9876543210", "").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_profile_sends_bearer_token() {
        let (url, mut requests) = serve(vec![(
            200,
            r#"{"id":"u-1","name":"Ravi K","phone":"9876543210"}"#,
        )])
        .await;
        let client = ApiClient::new(ClientConfig::new(url)).unwrap();
        client.set_token("tok-123");

        let user = client
            .update_profile(&ProfileUpdate {
                name: Some("Ravi K".to_string()),
                email: None,
            })
            .await
            .unwrap();
        assert_eq!(user.name, "Ravi K");
        assert_eq!(user.kyc_status, KycStatus::NotSubmitted);

        let request = requests.recv().await.unwrap();
        assert!(request.request_line().starts_with("PUT /users/me "));
        assert_eq!(
            request.header("authorization").as_deref(),
            Some("Bearer tok-123")
        );
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert!(body.get("email").is_none());
    }

    fn profile(password: &str) -> RegisterProfile {
        RegisterProfile {
            name: "Ravi".to_string(),
            phone: "+91 98765 43210".to_string(),
            password: password.to_string(),
            email: None,
            referral_code: Some("FRIEND10".to_string()),
        }
    }

    fn aadhaar() -> Vec<KycDocument> {
        vec![KycDocument {
            kind: DocumentKind::Aadhaar,
            file_name: "aadhaar.pdf".to_string(),
            content: b"%PDF".to_vec(),
        }]
    }

    fn personal_info() -> PersonalInfo {
        PersonalInfo {
            full_name: "Ravi Kumar".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            address: "Pune".to_string(),
            id_number: "1234 5678 9012".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_token() {
        let (url, mut requests) = serve(vec![(201, SESSION)]).await;
        let client = ApiClient::new(ClientConfig::new(url)).unwrap();

        let session = client.register(&profile("secret")).await.unwrap();
        assert_eq!(session.user.id, "u-1");
        assert_eq!(client.token().as_deref(), Some("tok-123"));

        let request = requests.recv().await.unwrap();
        assert!(request.request_line().starts_with("POST /auth/register "));
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["phone"], "9876543210");
        assert_eq!(body["referralCode"], "FRIEND10");
        assert!(body.get("email").is_none());
    }

    #[tokio::test]
    async fn test_short_register_password_never_hits_network() {
        let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();

        let err = client.register(&profile("12345")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_submit_kyc() {
        let (url, mut requests) =
            serve(vec![(200, r#"{"kycId":"kyc-9","status":"pending"}"#)]).await;
        let client = ApiClient::new(ClientConfig::new(url)).unwrap();
        client.set_token("tok-123");

        let receipt = client.submit_kyc(aadhaar(), personal_info()).await.unwrap();
        assert_eq!(receipt.kyc_id, "kyc-9");
        assert_eq!(receipt.status, KycStatus::Pending);

        let request = requests.recv().await.unwrap();
        assert!(request.request_line().starts_with("POST /kyc "));
        assert_eq!(
            request.header("authorization").as_deref(),
            Some("Bearer tok-123")
        );
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["documents"][0]["content"], "JVBERg==");
        assert_eq!(body["documents"][0]["kind"], "aadhaar");
        assert_eq!(body["personalInfo"]["fullName"], "Ravi Kumar");
    }

    #[tokio::test]
    async fn test_kyc_requires_login() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        let err = client
            .submit_kyc(aadhaar(), personal_info())
            .await
            .unwrap_err();
        assert!(matches!(err, NumbetError::Unauthorized(_)));
    }
}
