pub struct Env {
    pub database_url: String,
    pub ip: String,
    pub port: u16,
    pub admin_username: String,
    pub admin_password: String,
    pub session_secret: String,
    pub session_ttl: u64,
    pub upload_dir: String,
    pub public_base_url: String,
    pub is_production: bool,
}

impl Env {
    fn new() -> Self {
        let is_production =
            std::env::var("APP_ENV").map(|v| v == "production").unwrap_or(false);

        let admin_username = std::env::var("ADMIN_USERNAME").ok();
        let admin_password = std::env::var("ADMIN_PASSWORD").ok();
        let session_secret = std::env::var("SESSION_SECRET").ok();

        // Credentials are mandatory in production, defaulted (with a warning) in dev.
        if is_production {
            let mut missing: Vec<&str> = Vec::new();
            if admin_username.is_none() {
                missing.push("ADMIN_USERNAME");
            }
            if admin_password.is_none() {
                missing.push("ADMIN_PASSWORD");
            }
            if session_secret.is_none() {
                missing.push("SESSION_SECRET");
            }
            if !missing.is_empty() {
                log::error!("Missing required environment variables: {}", missing.join(", "));
                std::process::exit(1);
            }
        } else if admin_username.is_none() || admin_password.is_none() {
            log::warn!(
                "Using default credentials. Set ADMIN_USERNAME and ADMIN_PASSWORD in production."
            );
        }

        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");

        let ip = std::env::var("IP").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "20010".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");

        let session_ttl = std::env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<u64>()
            .expect("SESSION_TTL_SECONDS must be a valid u64 integer");

        let upload_dir =
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./public/uploads".to_string());

        Env {
            database_url,
            ip,
            port,
            admin_username: admin_username.unwrap_or_else(|| "admin".to_string()),
            admin_password: admin_password.unwrap_or_else(|| "admin123".to_string()),
            session_secret: session_secret
                .unwrap_or_else(|| format!("dev-secret-{}", uuid::Uuid::now_v7())),
            session_ttl,
            upload_dir,
            public_base_url: "/uploads".to_string(),
            is_production,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
