//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

pub use cli::{
    BuildArgs, BuildOverrides, CliArgs, Command, CommonOverrides, ServeArgs, ServeOverrides,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "vitrine";
const ENV_PREFIX: &str = "VITRINE";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 30;
const DEFAULT_CONTENT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_SNAPSHOT_PATH: &str = "content/snapshot.json";
const DEFAULT_BRAND: &str = "Vitrine";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000/";
const DEFAULT_DESCRIPTION: &str = "Find an office near you.";
const DEFAULT_OUT_DIR: &str = "dist";
pub(crate) const DEFAULT_BUILD_CONCURRENCY: usize = 4;

/// Fully-resolved deployment settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub content: ContentSource,
    pub site: SiteSettings,
    pub build: BuildSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub graceful_shutdown: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

/// Where office and testimonial content is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Api {
        endpoint: Url,
        token: Option<String>,
        timeout: Duration,
    },
    Snapshot {
        path: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub brand: String,
    pub public_url: Url,
    pub description: String,
    pub footer_copy: String,
}

#[derive(Debug, Clone)]
pub struct BuildSettings {
    pub out_dir: PathBuf,
    pub concurrency: usize,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        Some(Command::Build(args)) => raw.apply_build_overrides(&args.overrides),
        Some(Command::Schema) => {}
        None => raw.apply_serve_overrides(&ServeOverrides::default()),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    content: RawContentSettings,
    site: RawSiteSettings,
    build: RawBuildSettings,
}

impl RawSettings {
    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        if let Some(seconds) = overrides.server_graceful_shutdown_seconds {
            self.server.graceful_shutdown_seconds = Some(seconds);
        }

        self.apply_common_overrides(&overrides.common);
    }

    fn apply_build_overrides(&mut self, overrides: &BuildOverrides) {
        if let Some(dir) = overrides.out_dir.as_ref() {
            self.build.out_dir = Some(dir.clone());
        }
        if let Some(concurrency) = overrides.concurrency {
            self.build.concurrency = Some(concurrency);
        }

        self.apply_common_overrides(&overrides.common);
    }

    fn apply_common_overrides(&mut self, overrides: &CommonOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(path) = overrides.content_snapshot.as_ref() {
            self.content.source = Some(SNAPSHOT_SOURCE.to_string());
            self.content.snapshot_path = Some(path.clone());
        }
        if let Some(url) = overrides.content_url.as_ref() {
            self.content.source = Some(API_SOURCE.to_string());
            self.content.url = Some(url.clone());
        }
        if let Some(url) = overrides.site_public_url.as_ref() {
            self.site.public_url = Some(url.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            content,
            site,
            build,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            logging: build_logging_settings(logging)?,
            content: build_content_source(content)?,
            site: build_site_settings(site)?,
            build: build_build_settings(build),
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }

    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    let graceful_secs = server
        .graceful_shutdown_seconds
        .unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS);
    if graceful_secs == 0 {
        return Err(LoadError::invalid(
            "server.graceful_shutdown_seconds",
            "must be greater than zero",
        ));
    }

    Ok(ServerSettings {
        addr,
        graceful_shutdown: Duration::from_secs(graceful_secs),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

const API_SOURCE: &str = "api";
const SNAPSHOT_SOURCE: &str = "snapshot";

fn build_content_source(content: RawContentSettings) -> Result<ContentSource, LoadError> {
    let source = content
        .source
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_else(|| {
            if content.url.is_some() {
                API_SOURCE.to_string()
            } else {
                SNAPSHOT_SOURCE.to_string()
            }
        });

    match source.as_str() {
        API_SOURCE => {
            let raw_url = non_blank(content.url).ok_or_else(|| {
                LoadError::invalid("content.url", "required when content.source = \"api\"")
            })?;
            let endpoint = parse_http_url(&raw_url, "content.url")?;

            let timeout_secs = content
                .timeout_seconds
                .unwrap_or(DEFAULT_CONTENT_TIMEOUT_SECS);
            if timeout_secs == 0 {
                return Err(LoadError::invalid(
                    "content.timeout_seconds",
                    "must be greater than zero",
                ));
            }

            Ok(ContentSource::Api {
                endpoint,
                token: non_blank(content.token),
                timeout: Duration::from_secs(timeout_secs),
            })
        }
        SNAPSHOT_SOURCE => Ok(ContentSource::Snapshot {
            path: content
                .snapshot_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
        }),
        other => Err(LoadError::invalid(
            "content.source",
            format!("expected \"api\" or \"snapshot\", got \"{other}\""),
        )),
    }
}

fn build_site_settings(site: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let brand = non_blank(site.brand).unwrap_or_else(|| DEFAULT_BRAND.to_string());
    let public_url = parse_http_url(
        site.public_url.as_deref().unwrap_or(DEFAULT_PUBLIC_URL),
        "site.public_url",
    )?;
    let description =
        non_blank(site.description).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
    let footer_copy = non_blank(site.footer_copy).unwrap_or_else(|| format!("© {brand}"));

    Ok(SiteSettings {
        brand,
        public_url,
        description,
        footer_copy,
    })
}

fn build_build_settings(build: RawBuildSettings) -> BuildSettings {
    BuildSettings {
        out_dir: build
            .out_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
        concurrency: build.concurrency.unwrap_or(DEFAULT_BUILD_CONCURRENCY),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
    graceful_shutdown_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawContentSettings {
    source: Option<String>,
    url: Option<String>,
    token: Option<String>,
    timeout_seconds: Option<u64>,
    snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    brand: Option<String>,
    public_url: Option<String>,
    description: Option<String>,
    footer_copy: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawBuildSettings {
    out_dir: Option<PathBuf>,
    concurrency: Option<usize>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

fn parse_http_url(raw: &str, key: &'static str) -> Result<Url, LoadError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| LoadError::invalid(key, format!("invalid URL `{raw}`: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(LoadError::invalid(
            key,
            format!("unsupported scheme `{scheme}`"),
        )),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
