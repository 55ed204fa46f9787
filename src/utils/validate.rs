use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]+$").expect("Invalid course code regex"));

// 密码策略逐条检查，未满足的规则全部报给前端
const PASSWORD_RULES: [(&str, fn(&str) -> bool); 4] = [
    ("Password must be at least 8 characters long", |p| {
        p.len() >= 8
    }),
    ("Password must contain at least one uppercase letter", |p| {
        p.chars().any(|c| c.is_ascii_uppercase())
    }),
    ("Password must contain at least one lowercase letter", |p| {
        p.chars().any(|c| c.is_ascii_lowercase())
    }),
    ("Password must contain at least one digit", |p| {
        p.chars().any(|c| c.is_ascii_digit())
    }),
];

// 弱密码黑名单，命中即拒绝（忽略大小写）
const WEAK_PASSWORDS: [&str; 9] = [
    "password",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "password1",
    "Password1",
    "Qwerty123",
    "Abcd1234",
];

/// 用户名：5-16 位，字母数字下划线连字符
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 选课码：3-16 位大写字母与数字，调用方需先转为大写
pub fn validate_course_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 3 || code.len() > 16 {
        return Err("Course code length must be between 3 and 16 characters");
    }
    if !COURSE_CODE_RE.is_match(code) {
        return Err("Course code must contain only uppercase letters and digits");
    }
    Ok(())
}

/// 校验密码强度，所有未满足的规则拼成一条错误信息
pub fn validate_password(password: &str) -> Result<(), String> {
    let mut errors: Vec<&'static str> = PASSWORD_RULES
        .iter()
        .filter(|(_, check)| !check(password))
        .map(|(message, _)| *message)
        .collect();

    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_passwords_pass() {
        assert!(validate_password("SecureP@ss1").is_ok());
        assert!(validate_password("MyP@ssw0rd").is_ok());
        assert!(validate_password("SecurePass123").is_ok());
    }

    #[test]
    fn failed_rules_reported_together() {
        let msg = validate_password("abc").unwrap_err();
        assert!(msg.contains("at least 8 characters"));
        assert!(msg.contains("uppercase"));
        assert!(msg.contains("digit"));
    }

    #[test]
    fn missing_single_category_rejected() {
        assert!(validate_password("abcd1234").is_err()); // 无大写
        assert!(validate_password("ABCD1234").is_err()); // 无小写
        assert!(validate_password("AbcdEfgh").is_err()); // 无数字
    }

    #[test]
    fn common_password_rejected() {
        let msg = validate_password("Password1").unwrap_err();
        assert!(msg.contains("too common"));
        // 黑名单比较忽略大小写
        assert!(validate_password("PASSWORD1").is_err());
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn email_format() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn course_code_rules() {
        assert!(validate_course_code("CS101").is_ok());
        assert!(validate_course_code("MATH2026A").is_ok());
        assert!(validate_course_code("cs101").is_err());
        assert!(validate_course_code("CS").is_err());
        assert!(validate_course_code("CS-101").is_err());
    }
}
