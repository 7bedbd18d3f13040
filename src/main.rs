use canvas_tree::browser::{self, BrowserSession, DownloadScope, Downloader, NavigationWatcher};
use canvas_tree::filter::LocationFilter;
use canvas_tree::render::{self, FILE_SUFFIX};
use canvas_tree::{Capabilities, Capability, Config, CoursePage, Error, Source, controls, utils};
use clap::Parser;
use std::path::{Path, PathBuf};
use url::Url;

mod args;
use args::{Args, Format, convert_source};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    if let Err(e) = run(&args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<(), Error> {
    let config = load_config(args)?;

    match convert_source(args.type_, &args.uri, args.page_url.as_deref()) {
        Source::File { path, page_url } => {
            ::log::info!("Reading saved page: {}", path.display());
            if args.download.is_some() || args.watch {
                return Err(Error::Other(
                    "--download and --watch need a live browser (--type web)".to_string(),
                ));
            }
            let course_page = canvas_tree::load_file(&path, page_url.as_deref(), &config)?;
            emit(&course_page, args, &config)
        }
        Source::Web(uri) => {
            let url = Url::parse(&uri)?;
            println!("Note: Web extraction requires a WebDriver server (e.g., ChromeDriver).");
            println!(
                "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
            );

            let session = BrowserSession::connect(&config.webdriver_url).await?;
            let result = run_web(&session, &url, args, &config).await;
            if let Err(e) = session.close().await {
                ::log::warn!("Failed to close WebDriver session: {}", e);
            }
            result
        }
    }
}

/// Config file (if any), then environment and flag overrides
fn load_config(args: &Args) -> Result<Config, Error> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path).map_err(|e| {
            Error::Other(format!("failed to load config {}: {}", path.display(), e))
        })?,
        None => Config::default(),
    };

    // Override the WebDriver URL with an environment variable if provided
    if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
        if !webdriver_url.is_empty() {
            config.webdriver_url = webdriver_url;
        }
    }

    if args.pdf_only {
        config.capabilities = Capabilities::pdf_only();
    }

    Ok(config)
}

async fn run_web(
    session: &BrowserSession,
    url: &Url,
    args: &Args,
    config: &Config,
) -> Result<(), Error> {
    let course_page = canvas_tree::load_web(session, url, config).await?;
    emit(&course_page, args, config)?;

    if let Some(scope) = &args.download {
        let scope: DownloadScope = scope.parse()?;
        let mut navigator = session.clone();
        let report = Downloader::new(&mut navigator, LocationFilter::new(&course_page.url))
            .download_scope(
                &course_page.hierarchy,
                &scope,
                &config.capabilities,
                config,
                |progress| {
                    println!(
                        "⏳ ({}/{}) {}",
                        progress.index, progress.total, progress.title
                    )
                },
            )
            .await?;
        println!(
            "✅ Downloaded {} files ({} failed)",
            report.triggered, report.failed
        );
    }

    if args.watch {
        ::log::info!("Watching for navigation; stop with Ctrl-C");
        let watcher = NavigationWatcher::starting_at(&course_page.url);
        let mut rx = browser::watch(session.clone(), config.clone(), watcher);
        while let Some(course_page) = rx.recv().await {
            emit(&course_page, args, config)?;
        }
    }

    Ok(())
}

/// Print or save one extraction result in the requested format
fn emit(course_page: &CoursePage, args: &Args, config: &Config) -> Result<(), Error> {
    let hierarchy = &course_page.hierarchy;
    match args.format {
        Format::Summary => print_summary(course_page, config),
        Format::Json => {
            let json = serde_json::to_string_pretty(hierarchy)?;
            match &args.output {
                Some(path) => save(path, &json)?,
                None => println!("{}", json),
            }
        }
        Format::Markdown => {
            config.capabilities.require(Capability::MarkdownTree)?;
            let text = render::to_markdown(hierarchy, &course_page.tree_context());
            save(&export_path(args, &hierarchy.course_name, ".md"), &text)?;
        }
        Format::Html => {
            config.capabilities.require(Capability::PdfTree)?;
            let text = render::to_html(hierarchy, &course_page.tree_context());
            save(&export_path(args, &hierarchy.course_name, ".html"), &text)?;
        }
    }
    Ok(())
}

fn print_summary(course_page: &CoursePage, config: &Config) {
    let hierarchy = &course_page.hierarchy;
    println!(
        "{} (course {}) as {}",
        hierarchy.course_name, hierarchy.course_id, course_page.current_user
    );
    println!(
        "{} modules, {} sections, {} items, {} files",
        hierarchy.modules.len(),
        hierarchy.sections.len(),
        hierarchy.all_items.len(),
        hierarchy.all_attachments.len()
    );
    for (index, module) in hierarchy.modules.iter().enumerate() {
        println!(
            "  {}. {} [{}] ({} items, {} files)",
            index + 1,
            module.title,
            module.id,
            module.items.len(),
            module.attachments.len()
        );
        for section in hierarchy.sections_of(module) {
            println!(
                "     - {} [{}] ({} items, {} files)",
                section.title,
                section.id,
                section.items.len(),
                section.attachments.len()
            );
        }
    }

    println!("Controls:");
    for control in controls::plan(hierarchy, &config.capabilities) {
        println!("  [{}] {}", control.label, control.tooltip);
    }
}

fn export_path(args: &Args, course_name: &str, extension: &str) -> PathBuf {
    args.output.clone().unwrap_or_else(|| {
        PathBuf::from(utils::export_file_name_now(
            course_name,
            FILE_SUFFIX,
            extension,
        ))
    })
}

fn save(path: &Path, contents: &str) -> Result<(), Error> {
    std::fs::write(path, contents)?;
    ::log::info!("Saved {}", path.display());
    println!("Saved {}", path.display());
    Ok(())
}
