use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::models::actors::entities::{ActorContext, ActorRole};

const ACCESS_TOKEN_TYPE: &str = "access";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (操作者 ID)
    pub role: String,       // 操作者角色
    pub token_type: String, // token 类型，目前只接受 "access"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    /// 将声明转换为操作者上下文
    pub fn to_actor(&self) -> Result<ActorContext, String> {
        let actor_id = self
            .sub
            .parse::<i64>()
            .map_err(|_| "Invalid actor id in JWT".to_string())?;
        let role = self.role.parse::<ActorRole>()?;
        Ok(ActorContext::new(actor_id, role))
    }
}

/// JWT 签发与校验，密钥在启动时注入
#[derive(Clone)]
pub struct JwtUtils {
    secret: String,
    access_token_expiry: chrono::Duration,
}

impl JwtUtils {
    pub fn new(secret: impl Into<String>, access_token_expiry: chrono::Duration) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.jwt.secret.clone(),
            chrono::Duration::seconds(config.jwt.access_token_expiry),
        )
    }

    // 生成 Access Token
    pub fn generate_access_token(
        &self,
        actor_id: i64,
        role: &ActorRole,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.generate_token_with_expiry(
            actor_id,
            &role.to_string(),
            ACCESS_TOKEN_TYPE,
            self.access_token_expiry,
        )
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        &self,
        actor_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: actor_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证 JWT token
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    // 验证 Access Token
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = self.verify_token(token)?;
        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt() -> JwtUtils {
        JwtUtils::new("test-secret", chrono::Duration::minutes(5))
    }

    #[test]
    fn test_access_token_roundtrip() {
        let jwt = jwt();
        let token = jwt.generate_access_token(42, &ActorRole::Staff).unwrap();
        let claims = jwt.verify_access_token(&token).unwrap();
        assert_eq!(claims.to_actor().unwrap(), ActorContext::new(42, ActorRole::Staff));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = jwt().generate_access_token(1, &ActorRole::Admin).unwrap();
        let other = JwtUtils::new("another-secret", chrono::Duration::minutes(5));
        assert!(other.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_non_access_token_rejected() {
        let jwt = jwt();
        let token = jwt
            .generate_token_with_expiry(1, "admin", "refresh", chrono::Duration::minutes(5))
            .unwrap();
        assert!(jwt.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = jwt();
        let token = jwt
            .generate_token_with_expiry(1, "admin", "access", chrono::Duration::minutes(-10))
            .unwrap();
        assert!(jwt.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_unknown_role_is_not_an_actor() {
        let claims = Claims {
            sub: "5".into(),
            role: "superuser".into(),
            token_type: "access".into(),
            exp: 0,
            iat: 0,
        };
        assert!(claims.to_actor().is_err());
    }
}
