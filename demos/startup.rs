use confbind::{bindable, Config};

bindable! {
    #[derive(Debug, Default)]
    struct Exchange {
        #[bind(section = "exchange")]
        access_key: String,
        #[bind(section = "exchange")]
        secret_key: String,
        #[bind(section = "exchange", default = "false")]
        enable_private_signature: bool,
        #[bind(section = "exchange", omit = true)]
        private_key_prime256: String,
        #[bind(section = "exchange")]
        market_url: String,
    }
}

bindable! {
    #[derive(Debug, Default)]
    struct Mysql {
        #[bind(section = "mysql")]
        url: String,
    }
}

bindable! {
    #[derive(Debug, Default)]
    struct AppConfig {
        exchange: Exchange,
        mysql: Mysql,
    }
}

fn main() -> Result<(), confbind::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Bind once at startup; any error is fatal.
    let config: AppConfig = Config::builder()
        .with_file("demos/default.toml", true)
        .with_env("DEMO", "__")
        .with_file("demos/local.toml", false)
        .load()?;

    println!("market: {}", config.exchange.market_url);
    println!("mysql: {}", config.mysql.url);
    println!(
        "private signature: {} (key set: {})",
        config.exchange.enable_private_signature,
        !config.exchange.private_key_prime256.is_empty()
    );
    println!(
        "access key: {} (secret: {} chars)",
        config.exchange.access_key,
        config.exchange.secret_key.len()
    );

    Ok(())
}
