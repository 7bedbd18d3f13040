use canvas_tree::Source;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "canvas-tree")]
#[command(about = "Extracts the module/section/item tree of a Canvas course modules page")]
#[command(version)]
pub struct Args {
    /// Course modules URL, or path to a saved modules page
    pub uri: String,

    /// Source type (web, file)
    #[arg(short, long = "type", value_enum, default_value_t = SourceArg::Web)]
    pub type_: SourceArg,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address a saved page was loaded from (course id and link base)
    #[arg(long)]
    pub page_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Summary)]
    pub format: Format,

    /// Write markdown/html output here instead of a generated file name
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Download attachments: all, module:<title>, module-id:<id>, section:<title>
    /// or section-id:<id>
    #[arg(short, long)]
    pub download: Option<String>,

    /// Keep the browser open and re-extract on every modules page visited
    #[arg(short, long)]
    pub watch: bool,

    /// Offer only the PDF tree export
    #[arg(long)]
    pub pdf_only: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Web,
    File,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Counts and the control plan
    Summary,
    Json,
    Markdown,
    Html,
}

/// Convert from CLI argument source type to internal source type
pub fn convert_source(arg_type: SourceArg, uri: &str, page_url: Option<&str>) -> Source {
    match arg_type {
        SourceArg::Web => Source::Web(uri.to_string()),
        SourceArg::File => Source::File {
            path: PathBuf::from(uri),
            page_url: page_url.map(str::to_string),
        },
    }
}
