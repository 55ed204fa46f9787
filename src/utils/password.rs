use crate::config::AppConfig;
use crate::errors::CourseHubError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

// 代价参数取自配置，低配部署环境可以调低
fn hasher() -> Result<Argon2<'static>, CourseHubError> {
    let argon2_config = &AppConfig::get().argon2;
    let params = Params::new(
        argon2_config.memory_cost,
        argon2_config.time_cost,
        argon2_config.parallelism,
        None,
    )
    .map_err(|e| CourseHubError::validation(format!("Argon2 参数错误: {e}")))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 用 Argon2id 生成 PHC 格式的密码散列
pub fn hash_password(password: &str) -> Result<String, CourseHubError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CourseHubError::validation(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 校验明文密码与存储散列是否匹配，散列格式非法一律按不匹配处理
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    // 校验所需参数编码在散列串里，不用读配置
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_correct_and_rejects_wrong() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"s3cret-pass", &salt)
            .unwrap()
            .to_string();

        assert!(verify_password("s3cret-pass", &hash));
        assert!(!verify_password("wrong-pass", &hash));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }
}
