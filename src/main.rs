use std::{process, sync::Arc};

use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;
use vitrine::{
    application::{
        content::ContentClient,
        error::{AppError, ErrorReport},
        generate::SiteGenerator,
        office::{OfficePageService, SiteIdentity},
        rich_text::RichTextRenderer,
        testimonials::UniformPicker,
    },
    config::{self, ContentSource, Settings},
    domain::schema::carousel_block_schema,
    infra::{
        content::{GraphqlContentClient, SnapshotContentClient},
        error::InfraError,
        http::{self, HttpState},
        telemetry,
    },
    presentation::views::LayoutChrome,
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = ErrorReport::from_error("main", error);
    let log = || error!(error = %error, chain = ?report.messages, "vitrine failed");

    if dispatcher::has_been_set() {
        log();
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    dispatcher::with_default(&Dispatch::new(subscriber), log);
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    if let config::Command::Schema = command {
        return print_schema();
    }

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Build(_) => run_build(settings).await,
        config::Command::Schema => print_schema(),
    }
}

fn print_schema() -> Result<(), AppError> {
    let schemas = vec![carousel_block_schema()];
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}

async fn run_serve(settings: Settings) -> Result<(), AppError> {
    let offices = Arc::new(build_office_service(&settings).await?);
    let state = HttpState {
        offices,
        chrome: layout_chrome(&settings),
    };
    let router = http::build_router(state);

    let addr = settings.server.addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| InfraError::Bind { addr, source })?;
    info!(
        target = "vitrine::serve",
        addr = %addr,
        "Listening for office page requests"
    );

    let grace = settings.server.graceful_shutdown;
    let server =
        axum::serve(listener, router.into_make_service()).with_graceful_shutdown(shutdown_signal());

    tokio::select! {
        result = server => {
            result.map_err(AppError::Serve)?;
        }
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(
                target = "vitrine::serve",
                grace_secs = grace.as_secs(),
                "Graceful shutdown timed out; dropping open connections"
            );
        }
    }

    info!(target = "vitrine::serve", "Server stopped");
    Ok(())
}

async fn run_build(settings: Settings) -> Result<(), AppError> {
    let offices = Arc::new(build_office_service(&settings).await?);
    let generator = SiteGenerator::new(offices, layout_chrome(&settings));

    let report = generator
        .generate(&settings.build.out_dir, settings.build.concurrency)
        .await?;

    info!(
        target = "vitrine::build",
        pages = report.pages,
        assets = report.assets,
        out_dir = %report.out_dir.display(),
        "Build finished"
    );
    Ok(())
}

async fn build_office_service(settings: &Settings) -> Result<OfficePageService, AppError> {
    let content: Arc<dyn ContentClient> = match &settings.content {
        ContentSource::Api {
            endpoint,
            token,
            timeout,
        } => {
            info!(
                target = "vitrine::content",
                endpoint = %endpoint,
                "Using content API"
            );
            let client = GraphqlContentClient::new(endpoint.clone(), token.clone(), *timeout)?;
            Arc::new(client)
        }
        ContentSource::Snapshot { path } => {
            info!(
                target = "vitrine::content",
                path = %path.display(),
                "Using content snapshot"
            );
            let client =
                SnapshotContentClient::load(path)
                    .await
                    .map_err(|source| InfraError::Snapshot {
                        path: path.clone(),
                        source,
                    })?;
            Arc::new(client)
        }
    };

    let site = SiteIdentity::new(settings.site.brand.clone(), settings.site.public_url.as_str());
    Ok(OfficePageService::new(
        content,
        Arc::new(UniformPicker),
        Arc::new(RichTextRenderer::default()),
        site,
    ))
}

fn layout_chrome(settings: &Settings) -> LayoutChrome {
    LayoutChrome::new(
        &settings.site.brand,
        &settings.site.description,
        &settings.site.footer_copy,
    )
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            target = "vitrine::serve",
            error = %err,
            "Failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
}
