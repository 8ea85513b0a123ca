use std::env;

/// Which of the two services this process runs. The gateway and the
/// health-data service share a crate but are deployed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceRole {
    Gateway,
    HealthData,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service_role: ServiceRole,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    /// Required for the health-data role; the gateway holds no storage.
    pub database_url: Option<String>,

    pub jwt_secret: String,

    // Backend endpoints for the gateway routing table
    pub auth_service_url: String,
    pub user_service_url: String,
    pub health_data_service_url: String,
    pub ai_service_url: String,

    /// Upper bound on a single forwarded call (connect + response).
    pub gateway_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            service_role: match env::var("SERVICE_ROLE")
                .unwrap_or_else(|_| "health-data".into())
                .as_str()
            {
                "gateway" => ServiceRole::Gateway,
                "health-data" | "health_data" => ServiceRole::HealthData,
                other => panic!("SERVICE_ROLE must be 'gateway' or 'health-data', got '{other}'"),
            },
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            auth_service_url: env::var("AUTH_SERVICE_URL")
                .unwrap_or_else(|_| "http://auth-service:8001".into()),
            user_service_url: env::var("USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://user-service:8002".into()),
            health_data_service_url: env::var("HEALTH_DATA_SERVICE_URL")
                .unwrap_or_else(|_| "http://health-data-service:8003".into()),
            ai_service_url: env::var("AI_SERVICE_URL")
                .unwrap_or_else(|_| "http://ai-service:8004".into()),

            gateway_timeout_secs: env::var("GATEWAY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .expect("GATEWAY_TIMEOUT_SECS must be a number"),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
