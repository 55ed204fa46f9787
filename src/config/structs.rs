use serde::Deserialize;

/// 全局应用配置，层级与 config.toml 一一对应
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub argon2: Argon2Config,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// 对外展示的系统名，出现在启动横幅里
    pub system_name: String,
    /// development 或 production，影响日志格式与调试输出
    pub environment: String,
    /// tracing 的 EnvFilter 表达式
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 非空时优先于 host:port 走 Unix socket（仅类 Unix 平台生效）
    pub unix_socket_path: String,
    /// 0 表示按 CPU 核数自动设置
    pub workers: usize,
    /// workers 自动设置时的上限
    pub max_workers: usize,
    pub timeouts: ServerTimeouts,
    pub limits: ServerLimits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerTimeouts {
    pub client_request: u64,    // 毫秒
    pub client_disconnect: u64, // 毫秒
    pub keep_alive: u64,        // 秒
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerLimits {
    /// 请求体上限（字节）
    pub max_payload_size: usize,
}

/// JWT 签发参数，access 过期单位为分钟、refresh 为天
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
    /// 勾选「记住我」时 refresh token 的有效天数
    pub refresh_token_remember_me_expiry: i64,
}

/// Argon2id 代价参数
#[derive(Debug, Clone, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32, // KiB
    pub time_cost: u32,
    pub parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 连接 URL，数据库类型由 scheme 推断（sqlite:// 或 postgres://）
    pub url: String,
    pub pool_size: u32,
    /// 连接超时（秒）
    pub timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 后端插件名，内置 moka 与 redis
    #[serde(rename = "type")]
    pub cache_type: String,
    /// 条目默认存活秒数
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    /// 所有键统一加的前缀，与同实例上的其他业务隔离
    pub key_prefix: String,
    pub pool_size: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// 列表含 "*" 时放开全部来源
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    /// 预检结果缓存秒数
    pub max_age: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub dir: String,
    /// 单文件字节数上限
    pub max_size: usize,
    /// 允许的扩展名，写 "pdf" 或 ".pdf" 均可
    pub allowed_types: Vec<String>,
}
