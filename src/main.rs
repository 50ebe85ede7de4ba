use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;

use declassify::cli::Cli;
use declassify::emit::splitter::{write_header_files, SplitterConfig};
use declassify::emit::{banner, write_combined, write_struct_declarations};
use declassify::filter::NameFilter;
use declassify::hints::HintStore;
use declassify::io::metadata::read_metadata_file;
use declassify::render::Renderer;
use declassify::sort::UnitSort;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let mut metadata = read_metadata_file(&cli.metadata)?;

    let mut filter = NameFilter::new();
    if let Some(pattern) = &cli.filter_class {
        filter.set_class_pattern(pattern);
    }
    if let Some(pattern) = &cli.filter_method {
        filter.set_method_pattern(pattern);
    }
    for prefix in &cli.kill_prefixes {
        filter.add_kill_prefix(prefix.clone());
    }

    let hints = match &cli.hints {
        Some(path) => Some(HintStore::load(
            path,
            &metadata.units,
            &mut metadata.registry,
        )?),
        None => None,
    };

    let options = cli.render_options();
    let renderer = Renderer::new(&metadata.registry, &filter, hints.as_ref(), &options);
    let source = metadata
        .binary_path
        .clone()
        .unwrap_or_else(|| cli.metadata.display().to_string());

    if let Some(dir) = &cli.headers {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        let config = SplitterConfig {
            out_dir: dir,
            include_paths: &metadata.include_paths,
        };
        write_header_files(&config, &metadata.units, &renderer, &source)?;
    } else if cli.structs {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        write_struct_declarations(
            &mut writer,
            &metadata.registry,
            &filter,
            cli.unit_sort() == UnitSort::Alphabetic,
            &source,
        )?;
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        writer.write_all(banner(&source).as_bytes())?;
        write_combined(&mut writer, &metadata.units, &renderer, cli.unit_sort())?;
    }

    if let Some(store) = &hints {
        store.write()?;
    }

    Ok(())
}
