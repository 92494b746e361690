use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use quotation_pdf::{CompanyProfile, GenerateOptions, convert_json_to_pdf};

#[derive(Parser, Debug)]
#[command(version, about = "Render a quotation JSON file to a paginated A4 PDF")]
struct Args {
    /// Quotation JSON
    input: PathBuf,

    /// Output PDF path
    output: PathBuf,

    /// Company profile JSON (name, address, GST number, bank details, ...)
    #[arg(long)]
    company: Option<PathBuf>,

    /// Logo candidate path, tried before the defaults. Repeatable.
    #[arg(long = "logo")]
    logos: Vec<PathBuf>,

    /// Do not fetch product images; cards show placeholders
    #[arg(long)]
    offline: bool,

    /// HTTP timeout for product images, in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Skip the lopdf re-save pass
    #[arg(long)]
    no_resave: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let company = match &args.company {
        Some(path) => match CompanyProfile::from_json_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading company profile {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => CompanyProfile::default(),
    };

    let mut options = GenerateOptions::default();
    if !args.logos.is_empty() {
        let mut candidates = args.logos.clone();
        candidates.append(&mut options.logo_candidates);
        options.logo_candidates = candidates;
    }
    options.fetch_images = !args.offline;
    options.http_timeout = Duration::from_secs(args.timeout);
    options.resave = !args.no_resave;

    match convert_json_to_pdf(&args.input, &args.output, &company, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
