use anyhow::Context;
use bson::oid::ObjectId;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

impl JwtConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "folio".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "folio-admin".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        })
    }
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo: MongoConfig,
    pub jwt: JwtConfig,
    /// Explicit owner record; `None` falls back to the first user found.
    pub owner_id: Option<ObjectId>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mongo = MongoConfig {
            uri: std::env::var("MONGODB_URI").context("MONGODB_URI must be set")?,
            database: std::env::var("MONGODB_DB").unwrap_or_else(|_| "portfolio".into()),
        };
        let jwt = JwtConfig::from_env()?;
        let owner_id = parse_owner_id(std::env::var("OWNER_ID").ok().as_deref())?;
        Ok(Self {
            mongo,
            jwt,
            owner_id,
        })
    }
}

fn parse_owner_id(raw: Option<&str>) -> anyhow::Result<Option<ObjectId>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(hex) => ObjectId::parse_str(hex)
            .map(Some)
            .with_context(|| format!("OWNER_ID is not a valid object id: {hex}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_id_is_optional() {
        assert_eq!(parse_owner_id(None).unwrap(), None);
        assert_eq!(parse_owner_id(Some("  ")).unwrap(), None);
    }

    #[test]
    fn owner_id_parses_hex() {
        let id = ObjectId::new();
        let parsed = parse_owner_id(Some(id.to_hex().as_str())).unwrap();
        assert_eq!(parsed, Some(id));
    }

    #[test]
    fn owner_id_rejects_garbage() {
        let err = parse_owner_id(Some("not-an-id")).unwrap_err();
        assert!(err.to_string().contains("OWNER_ID"));
    }
}
