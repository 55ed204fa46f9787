use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

use rust_coursehub_next::config::AppConfig;
use rust_coursehub_next::models::AppStartTime;
use rust_coursehub_next::routes;
use rust_coursehub_next::runtime::lifetime;
use rust_coursehub_next::utils::{json_error_handler, query_error_handler};

/// 按运行环境初始化 tracing：开发环境彩色输出带文件行号，生产环境输出 JSON。
/// 返回的 guard 在 main 存活期间必须持有，否则缓冲日志会丢失。
fn init_tracing(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.app.log_level))
        .with_writer(writer)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_level(true)
                .with_ansi(true),
        );

    if config.is_development() {
        builder.with_file(true).with_line_number(true).init();
    } else {
        builder.json().init();
    }
    guard
}

/// 依配置组装 CORS 中间件，某一维度的列表含 "*" 即放开该维度
fn build_cors(config: &AppConfig) -> Cors {
    let cors_config = &config.cors;
    let mut cors = Cors::default().max_age(cors_config.max_age);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    if cors_config.allowed_methods.iter().any(|m| m == "*") {
        cors = cors.allow_any_method();
    } else {
        cors = cors.allowed_methods(cors_config.allowed_methods.iter().map(String::as_str));
    }

    if cors_config.allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_any_header();
    } else {
        cors = cors.allowed_headers(cors_config.allowed_headers.iter().map(String::as_str));
    }

    cors
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    setup_panic!();

    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();
    let _guard = init_tracing(config);

    warn!(
        "{} v{} starting (pid {})",
        config.app.system_name,
        env!("CARGO_PKG_VERSION"),
        std::process::id()
    );

    // 数据库、缓存等慢启动项集中在这里
    let startup = lifetime::startup::prepare_server_startup().await;
    let storage = startup.storage.clone();
    let cache = startup.cache.clone();

    debug!(
        "Startup preparation finished in {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time.start_datetime)
            .num_milliseconds()
    );

    warn!("Using {} CPU cores for the server", config.server.workers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(config))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add((
                        "Keep-Alive",
                        format!("timeout={}, max=1000", config.server.timeouts.keep_alive),
                    ))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            // 解析失败统一走自定义错误响应，而不是 actix 默认的纯文本
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PayloadConfig::new(
                config.server.limits.max_payload_size,
            ))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(routes::configure_auth_routes)
            .configure(routes::configure_courses_routes)
            .configure(routes::configure_assignments_routes)
            .configure(routes::configure_materials_routes)
            .configure(routes::configure_submissions_routes)
            .configure(routes::configure_grades_routes)
            .configure(routes::configure_file_routes)
            .configure(routes::configure_system_routes)
    })
    .keep_alive(std::time::Duration::from_secs(
        config.server.timeouts.keep_alive,
    ))
    .client_request_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_request,
    ))
    .client_disconnect_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_disconnect,
    ))
    .workers(config.server.workers);

    #[cfg(unix)]
    let server = if let Some(socket_path) = config.unix_socket_path() {
        warn!("Starting server on Unix socket: {}", socket_path);
        // 上次异常退出残留的 socket 文件会让 bind 失败，先清掉
        if std::path::Path::new(socket_path).exists() {
            std::fs::remove_file(socket_path)?;
        }
        server.bind_uds(socket_path)?
    } else {
        let bind_address = config.server_bind_address();
        warn!("Starting server at http://{}", bind_address);
        server.bind(bind_address)?
    };

    #[cfg(not(unix))]
    let server = {
        let bind_address = config.server_bind_address();
        warn!("Starting server at http://{}", bind_address);
        server.bind(bind_address)?
    };

    tokio::select! {
        res = server.run() => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
