use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use mribal_core::{
    load_annotation_boxes, load_mapping, BalancedExtractor, Cli, ExtractionReport, PngConverter,
};
use std::process;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> mribal_core::Result<()> {
    let config = cli.to_config();
    config.validate()?;

    info!("Loading annotation boxes from {}", config.boxes_path.display());
    let boxes = load_annotation_boxes(&config.boxes_path)?;

    info!("Loading mapping table from {}", config.mapping_path.display());
    let records = load_mapping(&config.mapping_path, &config)?;
    if records.is_empty() {
        info!("No mapping rows matched the exam/patient filters; nothing to extract");
    }

    let bar = progress_bar(records.len() as u64);
    let mut converter = PngConverter::new(&config.output_root);
    let mut extractor = BalancedExtractor::new(config.per_class_quota, config.buffer);
    let counters = extractor.scan(&records, &boxes, &mut converter, |_| bar.inc(1))?;
    bar.finish_and_clear();

    println!(
        "{}",
        ExtractionReport::new(counters, records.len(), config.per_class_quota)
    );
    Ok(())
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} ({eta})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}
