//! Info command: summarise one scan

use super::shared::format_size;
use crate::ScanStore;
use crate::app::models::Phase;
use crate::cli::args::InfoArgs;
use crate::constants::SAMPLE_HKL_FAMILIES;
use anyhow::{Context, Result};
use colored::*;
use std::io::{self, Write};
use tracing::info;

pub fn run_info(args: InfoArgs) -> Result<()> {
    let config = args.reader_config();
    info!(
        "Reading {} with the {} decoder",
        args.file.display(),
        config.strategy
    );

    let mut scan = ScanStore::new();
    scan.read_with_config(&args.file, &config)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let file_size = std::fs::metadata(&args.file)
        .map(|metadata| metadata.len())
        .unwrap_or_default();

    println!(
        "{} '{}' ({}) in {}ms",
        "Read".bright_green().bold(),
        args.file.display(),
        format_size(file_size),
        scan.stats().processing_time_ms
    );

    let mut stdout = io::stdout().lock();
    write_summary(&mut stdout, &scan, args.points).context("Failed to write scan summary")?;
    Ok(())
}

/// Header, phases and the first and last `sample_points` points
pub fn write_summary(out: &mut impl Write, scan: &ScanStore, sample_points: usize) -> io::Result<()> {
    let [x_star, y_star, z_star] = scan.pattern_center();
    writeln!(out, "pattern center  : {} {} {}", x_star, y_star, z_star)?;
    writeln!(out, "working distance: {}", scan.working_distance())?;
    writeln!(out, "pixel size      : {} x {}", scan.x_step(), scan.y_step())?;
    writeln!(
        out,
        "scan size       : ({}/{}) x {}",
        scan.odd_columns(),
        scan.even_columns(),
        scan.rows()
    )?;
    writeln!(out, "grid type       : {}", scan.grid_type())?;
    writeln!(out, "operator        : {}", scan.operator_name())?;
    writeln!(out, "sample ID       : {}", scan.sample_id())?;
    writeln!(out, "scan ID         : {}", scan.scan_id())?;

    writeln!(out, "{} phase(s):", scan.phases().len())?;
    for phase in scan.phases() {
        write_phase(out, phase)?;
    }

    writeln!(out)?;
    writeln!(out, "euler0\teuler1\teuler2\tX\tY\tIQ\tCI\tPhase")?;
    let total = scan.total_points();
    if 2 * sample_points >= total {
        for index in 0..total {
            write_point(out, scan, index)?;
        }
    } else {
        for index in 0..sample_points {
            write_point(out, scan, index)?;
        }
        writeln!(out, "...")?;
        for index in total - sample_points..total {
            write_point(out, scan, index)?;
        }
    }
    Ok(())
}

fn write_phase(out: &mut impl Write, phase: &Phase) -> io::Result<()> {
    writeln!(out, "\t{}: {}", phase.number, phase.name)?;
    writeln!(out, "\t\tformula : {}", phase.formula)?;
    writeln!(out, "\t\tinfo    : {}", phase.info)?;
    writeln!(out, "\t\tsymmetry: {}", phase.symmetry)?;
    writeln!(out, "\t\t{} hkl families:", phase.hkl_families.len())?;
    writeln!(out, "\t\t\thkl\tuse\tintensity\tshow")?;
    for family in phase.hkl_families.iter().take(SAMPLE_HKL_FAMILIES) {
        writeln!(
            out,
            "\t\t\t{} {} {}\t{}\t{}\t{}",
            family.hkl[0],
            family.hkl[1],
            family.hkl[2],
            u8::from(family.use_in_indexing),
            family.intensity,
            u8::from(family.show_bands)
        )?;
    }
    if phase.hkl_families.len() > SAMPLE_HKL_FAMILIES {
        writeln!(out, "\t\t\t...")?;
    }
    Ok(())
}

fn write_point(out: &mut impl Write, scan: &ScanStore, index: usize) -> io::Result<()> {
    let euler = &scan.euler()[3 * index..3 * index + 3];
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        euler[0],
        euler[1],
        euler[2],
        scan.x()[index],
        scan.y()[index],
        scan.image_quality()[index],
        scan.confidence_index()[index],
        scan.phase()[index]
    )
}
